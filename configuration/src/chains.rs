//! Chain connection configuration types

use std::str::FromStr;

/// Chain connection configuration
#[derive(Debug, Clone, PartialEq)]
pub enum Connection {
    /// HTTP connection details
    Http(
        /// Fully qualified URI to connect to
        String,
    ),
    /// Websocket connection details
    Ws(
        /// Fully qualified URI to connect to
        String,
    ),
}

impl Connection {
    fn from_string(s: String) -> eyre::Result<Self> {
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(Self::Http(s))
        } else if s.starts_with("wss://") || s.starts_with("ws://") {
            Ok(Self::Ws(s))
        } else {
            eyre::bail!("Expected http or websocket URI")
        }
    }

    /// The URI this connection points at
    pub fn url(&self) -> &str {
        match self {
            Connection::Http(url) => url,
            Connection::Ws(url) => url,
        }
    }
}

impl FromStr for Connection {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s.to_owned())
    }
}

impl Default for Connection {
    fn default() -> Self {
        Self::Http(Default::default())
    }
}

impl<'de> serde::Deserialize<'de> for Connection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_string(s).map_err(serde::de::Error::custom)
    }
}

/// A connection to _some_ blockchain.
///
/// The rpc style (enum variant) decides which client stack talks to the
/// chain; the connection details live under the `connection` key.
#[derive(Clone, Debug, serde::Deserialize, PartialEq)]
#[serde(tag = "rpcStyle", content = "connection", rename_all = "camelCase")]
pub enum ChainConf {
    /// EVM configuration
    Evm(Connection),
    /// Substrate configuration
    Substrate(Connection),
}

impl Default for ChainConf {
    fn default() -> Self {
        Self::Substrate(Default::default())
    }
}

impl ChainConf {
    /// Build ChainConf from env vars. Will use default RPCSTYLE if
    /// network-specific not provided.
    #[tracing::instrument]
    pub fn from_env(network: &str) -> Option<Self> {
        let style_key = format!("{}_RPCSTYLE", network);
        let default_style_key = "DEFAULT_RPCSTYLE";
        let rpc_style = std::env::var(style_key)
            .or_else(|_| {
                tracing::debug!("falling back to env default rpc style");
                std::env::var(default_style_key)
            })
            .unwrap_or_else(|_| {
                tracing::debug!("falling back to substrate");
                "substrate".to_owned()
            });

        let rpc_url: Connection = std::env::var(format!("{}_CONNECTION_URL", network))
            .map(|url| {
                tracing::debug!(url, "connection url env var read");
                url
            })
            .ok()?
            .parse()
            .map_err(|e: eyre::Report| {
                tracing::error!(err = e.to_string(), "unable to parse connection url")
            })
            .ok()?;

        Some(match rpc_style.as_str() {
            "substrate" => ChainConf::Substrate(rpc_url),
            "evm" => ChainConf::Evm(rpc_url),
            _ => panic!("Invalid rpc style {}", rpc_style),
        })
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::{ChainConf, Connection};

    #[test]
    fn it_desers_rpc_configs() {
        let value = json! {
            "https://google.com"
        };
        let connection: Connection = serde_json::from_value(value).unwrap();
        assert_eq!(connection, Connection::Http("https://google.com".to_owned()));
        let value = json! {
            "http://google.com"
        };
        let connection: Connection = serde_json::from_value(value).unwrap();
        assert_eq!(connection, Connection::Http("http://google.com".to_owned()));
        let value = json! {
            "wss://google.com"
        };
        let connection: Connection = serde_json::from_value(value).unwrap();
        assert_eq!(connection, Connection::Ws("wss://google.com".to_owned()));
        let value = json! {
            "ws://google.com"
        };
        let connection: Connection = serde_json::from_value(value).unwrap();
        assert_eq!(connection, Connection::Ws("ws://google.com".to_owned()));
    }

    #[test]
    fn it_rejects_unknown_schemes() {
        let value = json! {
            "ftp://google.com"
        };
        let res: Result<Connection, _> = serde_json::from_value(value);
        assert!(res.is_err());
    }

    #[test]
    fn it_desers_tagged_chain_confs() {
        let value = json!({
            "rpcStyle": "evm",
            "connection": "http://localhost:8545"
        });
        let conf: ChainConf = serde_json::from_value(value).unwrap();
        assert_eq!(
            conf,
            ChainConf::Evm(Connection::Http("http://localhost:8545".to_owned()))
        );

        let value = json!({
            "rpcStyle": "substrate",
            "connection": "ws://localhost:9944"
        });
        let conf: ChainConf = serde_json::from_value(value).unwrap();
        assert_eq!(
            conf,
            ChainConf::Substrate(Connection::Ws("ws://localhost:9944".to_owned()))
        );
    }
}
