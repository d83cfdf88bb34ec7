use ethers::contract::abigen;

abigen!(VeriCortexVerifier, "abi/VeriCortexVerifier.json");
