/// Create base http provider
#[macro_export]
macro_rules! http_provider {
    ($url:expr) => {{
        let provider = ethers::providers::Provider::<ethers::providers::Http>::try_from($url)?;
        Arc::new(provider)
    }};
}

/// Create base ws provider
#[macro_export]
macro_rules! ws_provider {
    ($url:expr) => {{
        let ws = ethers::providers::Ws::connect($url).await?;
        Arc::new(ethers::providers::Provider::new(ws))
    }};
}

macro_rules! boxed_client {
    (@cast $provider:expr, $abi:ident, $($tail:tt)*) => {{
        Box::new(crate::$abi::new($provider, $($tail)*))
    }};
    (@ws $url:expr, $($tail:tt)*) => {{
        let provider = ws_provider!($url);
        boxed_client!(@cast provider, $($tail)*)
    }};
    (@http $url:expr, $($tail:tt)*) => {{
        let provider = http_provider!($url);
        boxed_client!(@cast provider, $($tail)*)
    }};
    ($name:ident, $abi:ident, $trait:ident, $($n:ident:$t:ty),*)  => {
        #[doc = "Cast a contract locator to a live client handle"]
        pub async fn $name(conn: portage_configuration::Connection, locator: &ContractLocator, $($n:$t),*) -> color_eyre::Result<Box<dyn $trait>> {
            let b: Box<dyn $trait> = match conn {
                portage_configuration::Connection::Http (url) => {
                    boxed_client!(@http url, $abi, locator, $($n),*)
                }
                portage_configuration::Connection::Ws (url) => {
                    boxed_client!(@ws url, $abi, locator, $($n),*)
                }
            };
            Ok(b)
        }
    };
}
