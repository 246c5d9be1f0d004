use std::path::{Path, PathBuf};

use crate::engine::Client;
use crate::error::Result;
use crate::export;
use crate::schema::{Record, TradeParams};

pub fn countries_call(client: &Client) -> String {
    client.build_call(["attr", "country"])
}

pub fn products_call(client: &Client, classification: &str) -> String {
    client.build_call(["attr", classification])
}

pub fn trade_call(client: &Client, params: &TradeParams) -> String {
    client.build_call([
        &params.classification,
        &params.trade_flow,
        &params.year,
        &params.origin,
        &params.destination,
        &params.product,
    ])
}

impl Client {
    /// Country attributes (id, name, region, ...).
    pub async fn get_countries(&self, filename: Option<&Path>) -> Result<Vec<Record>> {
        let records = self.request_data(&countries_call(self)).await?;
        self.save(records, filename).await
    }

    /// Product descriptions under `classification` (`hs92`, `hs96`, `hs02`, `hs07`, `sitc`).
    pub async fn get_products(
        &self,
        classification: &str,
        filename: Option<&Path>,
    ) -> Result<Vec<Record>> {
        let records = self.request_data(&products_call(self, classification)).await?;
        self.save(records, filename).await
    }

    /// Trade values for the query described by `params`.
    pub async fn get_trade(
        &self,
        params: &TradeParams,
        filename: Option<&Path>,
    ) -> Result<Vec<Record>> {
        let records = self.request_data(&trade_call(self, params)).await?;
        self.save(records, filename).await
    }

    // export on a blocking thread when a filename is given, then hand the records back
    async fn save(&self, records: Vec<Record>, filename: Option<&Path>) -> Result<Vec<Record>> {
        let Some(path) = filename else {
            return Ok(records);
        };
        let path: PathBuf = path.to_path_buf();
        let options = self.export_options().clone();

        tokio::task::spawn_blocking(move || -> Result<Vec<Record>> {
            export::save_csv(&records, &path, &options)?;
            Ok(records)
        })
        .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::schema::trade_params;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn client() -> Client {
        Client::new(&Config::default())
    }

    #[test]
    fn attribute_calls() {
        let client = client();
        assert_eq!(countries_call(&client), "http://atlas.media.mit.edu/attr/country/");
        assert_eq!(products_call(&client, "hs92"), "http://atlas.media.mit.edu/attr/hs92/");
    }

    #[test]
    fn trade_call_follows_parameter_order() {
        let params = trade_params("sitc", "export", "2002.2005", "egy", "all", "show");
        assert_eq!(
            trade_call(&client(), &params),
            "http://atlas.media.mit.edu/sitc/export/2002.2005/egy/all/show/"
        );
    }

    #[tokio::test]
    async fn save_without_filename_returns_records() {
        let records = vec![json!({"id": "usa"}).as_object().unwrap().clone()];
        let saved = client().save(records.clone(), None).await.unwrap();
        assert_eq!(saved, records);
    }

    #[tokio::test]
    async fn save_writes_csv_and_returns_records() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("countries.csv");
        let records = vec![
            json!({"id": "usa", "name": "United States"}).as_object().unwrap().clone(),
            json!({"id": "egy", "name": "Egypt", "region": "Africa"}).as_object().unwrap().clone(),
        ];

        let saved = client().save(records.clone(), Some(path.as_path())).await.unwrap();
        assert_eq!(saved, records);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "id,name,region\nusa,United States,\\N\negy,Egypt,Africa\n"
        );
    }

    #[tokio::test]
    async fn save_honours_atomic_option() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("products.csv");
        let mut config = Config::default();
        config.export.atomic = true;
        config.export.null_marker = "NULL".to_string();

        let records = vec![
            json!({"id": "0101", "hs92": "Horses"}).as_object().unwrap().clone(),
            json!({"id": "0102"}).as_object().unwrap().clone(),
        ];
        Client::new(&config).save(records, Some(path.as_path())).await.unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "hs92,id\nHorses,0101\nNULL,0102\n");
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }
}
