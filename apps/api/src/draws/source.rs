//! Draw source adapter: point lookups against the official results endpoint.
//!
//! The endpoint has no listing or paging: every draw is addressed by number,
//! and an unknown number answers `{"returnValue": "fail"}`.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::models::Draw;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Error)]
pub enum LookupError {
    #[error("draw {0} does not exist")]
    NotFound(u32),

    #[error("transport error for draw {draw_no}: {message}")]
    Transport { draw_no: u32, message: String },

    #[error("malformed payload for draw {draw_no}: {message}")]
    Malformed { draw_no: u32, message: String },
}

/// A read-only, point-lookup-only source of draw records.
#[async_trait]
pub trait DrawSource: Send + Sync {
    async fn fetch(&self, draw_no: u32) -> Result<Draw, LookupError>;
}

// ────────────────────────────────────────────────────────────────────────────
// HTTP implementation
// ────────────────────────────────────────────────────────────────────────────

/// Queries `{base_url}{draw_no}` and decodes the JSON body.
pub struct HttpDrawSource {
    client: Client,
    base_url: String,
}

impl HttpDrawSource {
    pub fn new(base_url: String) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            base_url,
        })
    }
}

#[async_trait]
impl DrawSource for HttpDrawSource {
    async fn fetch(&self, draw_no: u32) -> Result<Draw, LookupError> {
        let url = format!("{}{}", self.base_url, draw_no);
        debug!("Fetching draw {draw_no} from {url}");

        let transport = |e: reqwest::Error| LookupError::Transport {
            draw_no,
            message: e.to_string(),
        };

        let response = self.client.get(&url).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Transport {
                draw_no,
                message: format!("source returned status {status}"),
            });
        }

        let body = response.text().await.map_err(transport)?;
        decode_payload(draw_no, &body)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Payload decoding
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DrawPayload {
    return_value: String,
    drw_no: Option<u32>,
    drw_no_date: Option<String>,
    drwt_no1: Option<u8>,
    drwt_no2: Option<u8>,
    drwt_no3: Option<u8>,
    drwt_no4: Option<u8>,
    drwt_no5: Option<u8>,
    drwt_no6: Option<u8>,
    bnus_no: Option<u8>,
    first_przwner_co: Option<u64>,
    first_winamnt: Option<u64>,
}

/// Turns a raw response body into a validated `Draw`.
pub fn decode_payload(draw_no: u32, body: &str) -> Result<Draw, LookupError> {
    let malformed = |message: String| LookupError::Malformed { draw_no, message };

    let payload: DrawPayload =
        serde_json::from_str(body).map_err(|e| malformed(format!("invalid JSON: {e}")))?;

    if payload.return_value != "success" {
        return Err(LookupError::NotFound(draw_no));
    }

    let missing = |field: &str| malformed(format!("missing field `{field}`"));

    let returned_no = payload.drw_no.ok_or_else(|| missing("drwNo"))?;
    if returned_no != draw_no {
        return Err(malformed(format!("source answered with draw {returned_no}")));
    }

    let date_text = payload.drw_no_date.ok_or_else(|| missing("drwNoDate"))?;
    let draw_date = NaiveDate::parse_from_str(&date_text, "%Y-%m-%d")
        .map_err(|e| malformed(format!("invalid draw date '{date_text}': {e}")))?;

    let numbers = [
        payload.drwt_no1.ok_or_else(|| missing("drwtNo1"))?,
        payload.drwt_no2.ok_or_else(|| missing("drwtNo2"))?,
        payload.drwt_no3.ok_or_else(|| missing("drwtNo3"))?,
        payload.drwt_no4.ok_or_else(|| missing("drwtNo4"))?,
        payload.drwt_no5.ok_or_else(|| missing("drwtNo5"))?,
        payload.drwt_no6.ok_or_else(|| missing("drwtNo6"))?,
    ];

    let draw = Draw {
        draw_no,
        draw_date,
        numbers,
        bonus_number: payload.bnus_no.ok_or_else(|| missing("bnusNo"))?,
        first_tier_winner_count: payload.first_przwner_co.unwrap_or(0),
        first_tier_prize_per_winner: payload.first_winamnt.unwrap_or(0),
    };

    draw.validate().map_err(malformed)?;
    Ok(draw)
}
