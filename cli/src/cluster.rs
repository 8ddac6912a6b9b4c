use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cluster {
    Localnet,
    Mainnet,
    Devnet,
    Testnet,
    Custom(String),
}

impl Cluster {
    pub fn rpc_url(&self) -> String {
        match self {
            Cluster::Localnet => "http://127.0.0.1:8899".to_string(),
            Cluster::Mainnet => "https://api.mainnet-beta.solana.com".to_string(),
            Cluster::Devnet => "https://api.devnet.solana.com".to_string(),
            Cluster::Testnet => "https://api.testnet.solana.com".to_string(),
            Cluster::Custom(url) => url.clone(),
        }
    }

    pub fn ws_url(&self) -> String {
        match self {
            Cluster::Localnet => "ws://127.0.0.1:8900".to_string(),
            Cluster::Mainnet => "wss://api.mainnet-beta.solana.com".to_string(),
            Cluster::Devnet => "wss://api.devnet.solana.com".to_string(),
            Cluster::Testnet => "wss://api.testnet.solana.com".to_string(),
            Cluster::Custom(url) => to_ws_url(url),
        }
    }
}

/// Same host over websockets: http -> ws, https -> wss.
fn to_ws_url(url: &str) -> String {
    if let Some(rest) = url.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else if let Some(rest) = url.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else {
        url.to_string()
    }
}

impl FromStr for Cluster {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "l" | "localnet" => Ok(Cluster::Localnet),
            "m" | "mainnet" => Ok(Cluster::Mainnet),
            "d" | "devnet" => Ok(Cluster::Devnet),
            "t" | "testnet" => Ok(Cluster::Testnet),
            s if s.starts_with("http://") || s.starts_with("https://") => Ok(Cluster::Custom(s.to_string())),
            _ => Err(format!(
                "Invalid network value: '{}'. Use devnet, mainnet, testnet, localnet (or d, m, t, l), or a valid RPC URL (http:// or https://)",
                s
            )),
        }
    }
}
