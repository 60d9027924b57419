use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use common::{Bar, BracketOrder, BrokerGateway, Environment, Error, Granularity, Result};

/// REST API client for OANDA v20. Used for candle queries and order placement.
pub struct OandaClient {
    api_key: String,
    account_id: String,
    base_url: String,
    http: Client,
}

impl OandaClient {
    pub fn new(
        api_key: impl Into<String>,
        account_id: impl Into<String>,
        environment: Environment,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            account_id: account_id.into(),
            base_url: environment.rest_host().to_string(),
            http: Client::builder()
                .use_rustls_tls()
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    async fn get(&self, path_and_query: &str) -> Result<(StatusCode, String)> {
        let url = format!("{}{}", self.base_url, path_and_query);
        let resp = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| Error::Connectivity(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::Connectivity(e.to_string()))?;
        Ok((status, body))
    }

    async fn post_json(&self, path: &str, body: &impl Serialize) -> Result<(StatusCode, String)> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Connectivity(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| Error::Connectivity(e.to_string()))?;
        Ok((status, text))
    }
}

#[async_trait]
impl BrokerGateway for OandaClient {
    async fn verify_connectivity(&self) -> Result<String> {
        let (status, body) = self
            .get(&format!("/v3/accounts/{}", self.account_id))
            .await?;

        if !status.is_success() {
            return Err(Error::Connectivity(format!("HTTP {status}: {body}")));
        }

        let resp: AccountWrapper =
            serde_json::from_str(&body).map_err(|e| Error::Connectivity(e.to_string()))?;
        Ok(resp.account.id)
    }

    async fn fetch_recent_bars(
        &self,
        instrument: &str,
        count: usize,
        granularity: Granularity,
    ) -> Result<Vec<Bar>> {
        let path = format!(
            "/v3/instruments/{instrument}/candles?count={count}&granularity={granularity}&price=M"
        );

        debug!(instrument, count, "Fetching candles from OANDA");
        let (status, body) = self.get(&path).await?;

        if !status.is_success() {
            return Err(Error::Data(format!("HTTP {status}: {body}")));
        }
        parse_candles(&body)
    }

    async fn submit_bracket_order(&self, order: &BracketOrder) -> Result<()> {
        let payload = order_payload(order);

        debug!(
            instrument = %order.instrument,
            units = order.units,
            "Submitting order to OANDA"
        );
        let (status, body) = self
            .post_json(&format!("/v3/accounts/{}/orders", self.account_id), &payload)
            .await?;

        if !status.is_success() {
            let reason = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error_message)
                .unwrap_or(body);
            return Err(Error::Rejection(format!("HTTP {status}: {reason}")));
        }
        Ok(())
    }
}

/// Parse a candles response body into bars, keeping only complete candles.
fn parse_candles(body: &str) -> Result<Vec<Bar>> {
    let resp: CandlesResponse =
        serde_json::from_str(body).map_err(|e| Error::Data(e.to_string()))?;

    resp.candles
        .into_iter()
        .filter(|c| c.complete)
        .map(Candle::into_bar)
        .collect()
}

fn order_payload(order: &BracketOrder) -> OrderPayload {
    OrderPayload {
        order: MarketOrderRequest {
            instrument: order.instrument.clone(),
            units: order.units.to_string(),
            order_type: "MARKET",
            position_fill: "DEFAULT",
            take_profit_on_fill: PriceLeg {
                price: format_price(order.take_profit),
            },
            stop_loss_on_fill: PriceLeg {
                price: format_price(order.stop_loss),
            },
        },
    }
}

/// OANDA requires decimal-string prices; five places covers every instrument
/// the bot trades.
fn format_price(price: f64) -> String {
    format!("{price:.5}")
}

fn parse_price(raw: &str) -> Result<f64> {
    raw.parse()
        .map_err(|_| Error::Data(format!("bad price {raw:?}")))
}

// ─── Request and response types ───────────────────────────────────────────────

#[derive(Serialize)]
struct OrderPayload {
    order: MarketOrderRequest,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MarketOrderRequest {
    instrument: String,
    units: String,
    #[serde(rename = "type")]
    order_type: &'static str,
    position_fill: &'static str,
    take_profit_on_fill: PriceLeg,
    stop_loss_on_fill: PriceLeg,
}

#[derive(Serialize)]
struct PriceLeg {
    price: String,
}

#[derive(Deserialize)]
struct AccountWrapper {
    account: AccountDetail,
}

#[derive(Deserialize)]
struct AccountDetail {
    id: String,
}

#[derive(Deserialize)]
struct CandlesResponse {
    candles: Vec<Candle>,
}

#[derive(Deserialize)]
struct Candle {
    complete: bool,
    time: String,
    mid: CandlePrices,
}

impl Candle {
    fn into_bar(self) -> Result<Bar> {
        let time = DateTime::parse_from_rfc3339(&self.time)
            .map_err(|e| Error::Data(format!("bad candle time {:?}: {e}", self.time)))?
            .with_timezone(&Utc);

        Ok(Bar {
            time,
            high: parse_price(&self.mid.h)?,
            low: parse_price(&self.mid.l)?,
            close: parse_price(&self.mid.c)?,
        })
    }
}

#[derive(Deserialize)]
struct CandlePrices {
    h: String,
    l: String,
    c: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    error_message: String,
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use common::Direction;

    #[test]
    fn incomplete_candles_are_dropped() {
        let body = r#"{
            "instrument": "EUR_USD",
            "granularity": "M1",
            "candles": [
                {
                    "complete": true,
                    "volume": 120,
                    "time": "2024-01-10T14:28:00.000000000Z",
                    "mid": { "o": "1.09231", "h": "1.09305", "l": "1.09198", "c": "1.09260" }
                },
                {
                    "complete": false,
                    "volume": 7,
                    "time": "2024-01-10T14:29:00.000000000Z",
                    "mid": { "o": "1.09260", "h": "1.09280", "l": "1.09255", "c": "1.09270" }
                }
            ]
        }"#;

        let bars = parse_candles(body).unwrap();
        assert_eq!(bars.len(), 1);
        assert!((bars[0].high - 1.09305).abs() < 1e-9);
        assert!((bars[0].low - 1.09198).abs() < 1e-9);
        assert!((bars[0].close - 1.09260).abs() < 1e-9);
        assert_eq!(bars[0].time.to_rfc3339(), "2024-01-10T14:28:00+00:00");
    }

    #[test]
    fn malformed_price_is_a_data_error() {
        let body = r#"{
            "candles": [
                {
                    "complete": true,
                    "time": "2024-01-10T14:28:00.000000000Z",
                    "mid": { "h": "not-a-price", "l": "1.09198", "c": "1.09260" }
                }
            ]
        }"#;

        let err = parse_candles(body).unwrap_err();
        assert!(matches!(err, Error::Data(_)));
    }

    #[test]
    fn order_payload_uses_oanda_wire_formats() {
        let order = BracketOrder {
            instrument: "EUR_USD".into(),
            units: 100,
            take_profit: 1.0945,
            stop_loss: 1.0925,
        };

        let value = serde_json::to_value(order_payload(&order)).unwrap();
        let body = &value["order"];
        assert_eq!(body["instrument"], "EUR_USD");
        assert_eq!(body["units"], "100");
        assert_eq!(body["type"], "MARKET");
        assert_eq!(body["positionFill"], "DEFAULT");
        assert_eq!(body["takeProfitOnFill"]["price"], "1.09450");
        assert_eq!(body["stopLossOnFill"]["price"], "1.09250");
    }

    #[test]
    fn short_orders_serialize_negative_units() {
        let signal = common::TradeSignal {
            direction: Direction::Short,
            entry_price: 2043.5,
            stop_loss: 2053.5,
            take_profit: 2013.5,
        };
        let order = BracketOrder::from_signal("XAU_USD", &signal, 1);

        let value = serde_json::to_value(order_payload(&order)).unwrap();
        assert_eq!(value["order"]["units"], "-1");
        assert_eq!(value["order"]["stopLossOnFill"]["price"], "2053.50000");
        assert_eq!(value["order"]["takeProfitOnFill"]["price"], "2013.50000");
    }

    #[test]
    fn prices_are_formatted_to_five_places() {
        assert_eq!(format_price(1.234567), "1.23457");
        assert_eq!(format_price(10.0), "10.00000");
        assert_eq!(format_price(0.0005), "0.00050");
    }
}
