#![allow(missing_docs)]
#![allow(clippy::all)]

use ethers::contract::abigen;

abigen!(
    Erc20,
    r#"[
        function balanceOf(address) view returns (uint256)
        function decimals() view returns (uint8)
        event Transfer(address indexed from, address indexed to, uint256 value)
    ]"#
);

abigen!(
    Router,
    r#"[
        function send(address token, uint256 amount, uint256 fee, uint32 destination, bytes32 recipient)
    ]"#
);
