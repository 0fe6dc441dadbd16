//! Conversion: wire responses → `Coin` / `CoinDetail`.

use super::wire::{CoinDetailResponse, CoinMarketResponse, CurrencyValues};
use super::{Coin, CoinDetail, ValidationError};
use crate::shared::{decimal_from_f64, CoinId};
use rust_decimal::Decimal;

fn or_zero(value: Option<f64>) -> Decimal {
    value.and_then(decimal_from_f64).unwrap_or(Decimal::ZERO)
}

fn in_currency(values: &CurrencyValues, vs_currency: &str) -> Decimal {
    or_zero(values.get(vs_currency).copied().flatten())
}

impl TryFrom<CoinMarketResponse> for Coin {
    type Error = ValidationError;

    fn try_from(source: CoinMarketResponse) -> Result<Self, Self::Error> {
        let id = CoinId::new(source.id.trim());
        if id.is_empty() {
            return Err(ValidationError::MissingId);
        }

        let sparkline = source
            .sparkline_in_7d
            .map(|s| {
                s.price
                    .into_iter()
                    .flatten()
                    .filter_map(decimal_from_f64)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Coin {
            id,
            symbol: source.symbol,
            name: source.name,
            image: source.image.unwrap_or_default(),
            current_price: or_zero(source.current_price),
            market_cap: or_zero(source.market_cap),
            market_cap_rank: source.market_cap_rank,
            total_volume: or_zero(source.total_volume),
            change_1h: source
                .price_change_percentage_1h_in_currency
                .and_then(decimal_from_f64),
            change_24h: source
                .price_change_percentage_24h
                .or(source.price_change_percentage_24h_in_currency)
                .and_then(decimal_from_f64),
            change_7d: source
                .price_change_percentage_7d_in_currency
                .and_then(decimal_from_f64),
            sparkline,
        })
    }
}

impl TryFrom<(CoinDetailResponse, &str)> for CoinDetail {
    type Error = ValidationError;

    fn try_from((source, vs_currency): (CoinDetailResponse, &str)) -> Result<Self, Self::Error> {
        let id = CoinId::new(source.id.trim());
        if id.is_empty() {
            return Err(ValidationError::MissingId);
        }
        let market_data = source
            .market_data
            .ok_or_else(|| ValidationError::MissingMarketData(id.to_string()))?;
        let image = source
            .image
            .and_then(|img| img.large.or(img.small).or(img.thumb))
            .unwrap_or_default();

        Ok(CoinDetail {
            current_price: in_currency(&market_data.current_price, vs_currency),
            market_cap: in_currency(&market_data.market_cap, vs_currency),
            total_volume: in_currency(&market_data.total_volume, vs_currency),
            circulating_supply: market_data.circulating_supply.and_then(decimal_from_f64),
            id,
            symbol: source.symbol,
            name: source.name,
            image,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_coin_defaults_for_missing_fields() {
        let resp: CoinMarketResponse =
            serde_json::from_str(r#"{"id": "tether", "symbol": "usdt", "name": "Tether"}"#)
                .unwrap();
        let coin = Coin::try_from(resp).unwrap();
        assert_eq!(coin.current_price, Decimal::ZERO);
        assert_eq!(coin.market_cap, Decimal::ZERO);
        assert_eq!(coin.market_cap_rank, None);
        assert_eq!(coin.change_24h, None);
        assert!(coin.sparkline.is_empty());
        assert_eq!(coin.image, "");
    }

    #[test]
    fn test_coin_full_record() {
        let json = r#"{
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "image": "https://img/btc.png",
            "current_price": 67000.25,
            "market_cap": 1320000000000,
            "market_cap_rank": 1,
            "price_change_percentage_24h": -1.25,
            "price_change_percentage_1h_in_currency": 0.1,
            "price_change_percentage_7d_in_currency": 4.5,
            "sparkline_in_7d": {"price": [66000.0, null, 67000.0]}
        }"#;
        let resp: CoinMarketResponse = serde_json::from_str(json).unwrap();
        let coin = Coin::try_from(resp).unwrap();
        assert_eq!(coin.id.as_str(), "bitcoin");
        assert_eq!(coin.current_price, Decimal::from_str("67000.25").unwrap());
        assert_eq!(coin.market_cap_rank, Some(1));
        assert_eq!(coin.change_24h, Some(Decimal::from_str("-1.25").unwrap()));
        assert_eq!(coin.change_1h, Some(Decimal::from_str("0.1").unwrap()));
        assert_eq!(coin.sparkline.len(), 2);
    }

    #[test]
    fn test_coin_24h_falls_back_to_in_currency() {
        let resp: CoinMarketResponse = serde_json::from_str(
            r#"{"id": "x", "price_change_percentage_24h_in_currency": 3.0}"#,
        )
        .unwrap();
        let coin = Coin::try_from(resp).unwrap();
        assert_eq!(coin.change_24h, Some(Decimal::from(3)));
    }

    #[test]
    fn test_coin_rejects_blank_id() {
        let resp: CoinMarketResponse =
            serde_json::from_str(r#"{"id": "  ", "name": "Nameless"}"#).unwrap();
        assert_eq!(Coin::try_from(resp), Err(ValidationError::MissingId));
    }

    #[test]
    fn test_detail_reads_vs_currency() {
        let json = r#"{
            "id": "ethereum", "symbol": "eth", "name": "Ethereum",
            "image": {"small": "s.png", "large": "l.png"},
            "market_data": {
                "current_price": {"usd": 3500.5, "eur": 3200.0},
                "market_cap": {"usd": 420000000000},
                "total_volume": {}
            }
        }"#;
        let resp: CoinDetailResponse = serde_json::from_str(json).unwrap();
        let detail = CoinDetail::try_from((resp.clone(), "eur")).unwrap();
        assert_eq!(detail.current_price, Decimal::from(3200));
        assert_eq!(detail.market_cap, Decimal::ZERO);
        assert_eq!(detail.image, "l.png");

        let detail = CoinDetail::try_from((resp, "usd")).unwrap();
        assert_eq!(detail.current_price, Decimal::from_str("3500.5").unwrap());
        assert_eq!(detail.total_volume, Decimal::ZERO);
        assert_eq!(detail.circulating_supply, None);
    }

    #[test]
    fn test_detail_requires_market_data() {
        let resp: CoinDetailResponse =
            serde_json::from_str(r#"{"id": "ghost", "name": "Ghost"}"#).unwrap();
        assert_eq!(
            CoinDetail::try_from((resp, "usd")),
            Err(ValidationError::MissingMarketData("ghost".to_string()))
        );
    }
}
