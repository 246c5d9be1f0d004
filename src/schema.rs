use serde::{Deserialize, Serialize};

/// One flat item returned by the API. Key sets vary between records.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Sorted, deduplicated column names for a batch of records.
pub type Header = Vec<String>;

// every OEC response wraps its payload in {"data": [...]}
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub data: Vec<Record>,
}

/// The six path parameters of a trade query.
///
/// * `classification` - product classification (`hs92`, `hs96`, `hs02`, `hs07`, `sitc`)
/// * `trade_flow` - `import` or `export`
/// * `year` - a single year (`2015`) or a range (`2002.2005`)
/// * `origin` - a country id (`egy`), `show` for every country, or `all` to sum
/// * `destination` - same values as `origin`
/// * `product` - `show`, `all`, or a four-digit HS/SITC id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeParams {
    pub classification: String,
    pub trade_flow: String,
    pub year: String,
    pub origin: String,
    pub destination: String,
    pub product: String,
}

pub fn trade_params(
    classification: impl Into<String>,
    trade_flow: impl Into<String>,
    year: impl ToString,
    origin: impl Into<String>,
    destination: impl Into<String>,
    product: impl Into<String>,
) -> TradeParams {
    TradeParams {
        classification: classification.into(),
        trade_flow: trade_flow.into(),
        year: year.to_string(),
        origin: origin.into(),
        destination: destination.into(),
        product: product.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_keeps_heterogeneous_records() {
        let body = r#"{"data": [{"id": "usa"}, {"id": "egy", "region": "Africa"}]}"#;
        let envelope: Envelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.data.len(), 2);
        assert_eq!(envelope.data[1]["region"], "Africa");
    }

    #[test]
    fn envelope_without_data_is_rejected() {
        assert!(serde_json::from_str::<Envelope>(r#"{"rows": []}"#).is_err());
    }

    #[test]
    fn trade_params_accepts_numeric_year() {
        let params = trade_params("hs92", "export", 2015, "egy", "all", "show");
        assert_eq!(params.year, "2015");

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["classification"], "hs92");
        assert_eq!(json["destination"], "all");
    }
}
