pub mod coingecko;
pub mod toncenter;
