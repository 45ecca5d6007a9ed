use ethers::abi::AbiEncode;
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::types::{Bytes, TransactionRequest};
use portage_core::ContractTransfer;

use crate::bindings::router::SendCall;

/// Abi-encode a transfer for dispatch through its router
pub fn transfer_calldata(transfer: &ContractTransfer) -> Bytes {
    SendCall {
        token: transfer.token,
        amount: transfer.amount,
        fee: transfer.fee,
        destination: transfer.destination_domain,
        recipient: transfer.recipient.into(),
    }
    .encode()
    .into()
}

/// Assemble an unsigned transaction dispatching a transfer through its
/// router. Signing and submission are left to the caller
pub fn transfer_request(transfer: &ContractTransfer) -> TypedTransaction {
    TransactionRequest::new()
        .to(transfer.router)
        .data(transfer_calldata(transfer))
        .into()
}

#[cfg(test)]
mod test {
    use ethers::abi::AbiDecode;
    use ethers::types::{Address, U256};
    use portage_types::WalletAddress;

    use super::*;

    #[test]
    fn it_encodes_router_dispatches() {
        let transfer = ContractTransfer {
            origin_domain: 2004,
            destination_domain: 2000,
            router: "0x0000000000000000000000000000000000000804"
                .parse::<Address>()
                .unwrap(),
            token: "0xffffffff1fcacbd218edc0eba20fc2308c778080"
                .parse::<Address>()
                .unwrap(),
            amount: U256::from(150_000u64),
            fee: U256::from(199u64),
            recipient: WalletAddress::from([7u8; 32]),
        };

        let data = transfer_calldata(&transfer);
        let decoded = SendCall::decode(data.as_ref()).unwrap();
        assert_eq!(decoded.token, transfer.token);
        assert_eq!(decoded.amount, transfer.amount);
        assert_eq!(decoded.fee, transfer.fee);
        assert_eq!(decoded.destination, transfer.destination_domain);
        assert_eq!(decoded.recipient, <[u8; 32]>::from(transfer.recipient));

        let tx = transfer_request(&transfer);
        assert_eq!(tx.data().unwrap(), &data);
    }
}
