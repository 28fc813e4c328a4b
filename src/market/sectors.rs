/// Representative tickers per sector, in preference order.
/// Sector names follow the provider's classification strings.
pub const SECTOR_PEERS: &[(&str, &[&str])] = &[
    ("Technology", &["AAPL", "MSFT", "NVDA", "ORCL", "ADBE"]),
    ("Financial Services", &["JPM", "BAC", "GS", "MS", "WFC"]),
    ("Healthcare", &["JNJ", "PFE", "UNH", "MRK", "ABBV"]),
    ("Consumer Cyclical", &["AMZN", "TSLA", "HD", "NKE", "MCD"]),
    ("Consumer Defensive", &["PG", "KO", "PEP", "WMT", "COST"]),
    ("Energy", &["XOM", "CVX", "COP", "SLB", "EOG"]),
    ("Communication Services", &["GOOGL", "META", "NFLX", "DIS", "VZ"]),
    ("Industrials", &["CAT", "GE", "HON", "UPS", "BA"]),
    ("Utilities", &["NEE", "DUK", "SO", "D", "AEP"]),
    ("Real Estate", &["PLD", "AMT", "EQIX", "SPG", "O"]),
    ("Basic Materials", &["LIN", "APD", "SHW", "ECL", "NEM"]),
];

/// Peer list for `sector`, matched case-insensitively.
pub fn peers(sector: &str) -> Option<&'static [&'static str]> {
    let sector = sector.trim();
    SECTOR_PEERS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(sector))
        .map(|(_, tickers)| *tickers)
}

/// First peer in `sector` that is not `ticker` itself.
pub fn competitor_for(sector: &str, ticker: &str) -> Option<&'static str> {
    first_other(peers(sector)?, ticker)
}

fn first_other<'a>(list: &[&'a str], ticker: &str) -> Option<&'a str> {
    let ticker = ticker.trim();
    list.iter().copied().find(|peer| !peer.eq_ignore_ascii_case(ticker))
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct SectorEntry {
    pub sector: &'static str,
    pub tickers: &'static [&'static str],
}

pub fn sectors() -> Vec<SectorEntry> {
    SECTOR_PEERS
        .iter()
        .map(|&(sector, tickers)| SectorEntry { sector, tickers })
        .collect()
}
