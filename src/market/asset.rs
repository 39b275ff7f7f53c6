use bigdecimal::BigDecimal;
use serde::de;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

// used verbatim whenever the live fetch fails
const FALLBACK_ASSETS: [(&str, &str, &str); 6] = [
    ("BTC", "64231.45", "2.34"),
    ("ETH", "3452.12", "-1.12"),
    ("SOL", "145.67", "5.67"),
    ("BNB", "590.33", "0.45"),
    ("XRP", "0.62", "-0.89"),
    ("ADA", "0.45", "1.20"),
];

// example element of the response `data` array
// {"id":"bitcoin","symbol":"BTC","priceUsd":"64231.45","changePercent24Hr":"2.34",...}
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Asset {
    pub symbol: String,
    #[serde(rename = "priceUsd", deserialize_with = "deserialize_decimal")]
    pub price_usd: BigDecimal,
    #[serde(rename = "changePercent24Hr", deserialize_with = "deserialize_decimal")]
    pub change_percent_24h: BigDecimal,
}

impl Asset {
    pub fn new(symbol: &str, price_usd: BigDecimal, change_percent_24h: BigDecimal) -> Self {
        Self {
            symbol: symbol.to_string(),
            price_usd,
            change_percent_24h,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetSourceKind {
    Live,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssetList {
    pub assets: Vec<Asset>,
    pub source: AssetSourceKind,
}

impl AssetList {
    pub fn live(assets: Vec<Asset>) -> Self {
        Self {
            assets,
            source: AssetSourceKind::Live,
        }
    }

    pub fn fallback() -> Self {
        let assets = FALLBACK_ASSETS
            .iter()
            .filter_map(|(symbol, price, change)| {
                let price = BigDecimal::from_str(price).ok()?;
                let change = BigDecimal::from_str(change).ok()?;
                Some(Asset::new(symbol, price, change))
            })
            .collect();

        Self {
            assets,
            source: AssetSourceKind::Fallback,
        }
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

// CoinCap sends decimals as strings, other sources as plain numbers
fn deserialize_decimal<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let text = match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        other => {
            return Err(de::Error::custom(format!(
                "expected a decimal string or number, found {}",
                other
            )))
        }
    };

    BigDecimal::from_str(text.trim()).map_err(de::Error::custom)
}
