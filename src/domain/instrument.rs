//! Instrument catalog: static display-name to provider-symbol tables.
//!
//! The catalog is the only place asset-class-specific ticker knowledge lives.
//! Adding an asset class means adding one table here, not new pipeline code.

use crate::domain::error::MarketLensError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetClass {
    Index,
    Crypto,
    Currency,
    Etf,
    MutualFund,
    TreasuryYield,
    SectorEtf,
    CanadianEquity,
    Sp500,
    BondEtf,
    Commodity,
}

impl AssetClass {
    pub const ALL: [AssetClass; 11] = [
        AssetClass::Index,
        AssetClass::Crypto,
        AssetClass::Currency,
        AssetClass::Etf,
        AssetClass::MutualFund,
        AssetClass::TreasuryYield,
        AssetClass::SectorEtf,
        AssetClass::CanadianEquity,
        AssetClass::Sp500,
        AssetClass::BondEtf,
        AssetClass::Commodity,
    ];

    /// Stable lowercase key used on the command line and in error messages.
    pub fn key(&self) -> &'static str {
        match self {
            AssetClass::Index => "index",
            AssetClass::Crypto => "crypto",
            AssetClass::Currency => "currency",
            AssetClass::Etf => "etf",
            AssetClass::MutualFund => "mutual-fund",
            AssetClass::TreasuryYield => "treasury-yield",
            AssetClass::SectorEtf => "sector-etf",
            AssetClass::CanadianEquity => "canadian-equity",
            AssetClass::Sp500 => "sp500",
            AssetClass::BondEtf => "bond-etf",
            AssetClass::Commodity => "commodity",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AssetClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssetClass::ALL
            .iter()
            .find(|c| c.key() == s)
            .copied()
            .ok_or_else(|| format!("unknown asset class: {s}"))
    }
}

/// One selectable instrument. Immutable, defined at process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instrument {
    pub display_name: &'static str,
    pub provider_symbol: &'static str,
    pub asset_class: AssetClass,
}

const INDICES: &[(&str, &str)] = &[
    ("Dow Jones Industrial Average", "^DJI"),
    ("S&P 500", "^GSPC"),
    ("NASDAQ Composite", "^IXIC"),
    ("FTSE 100", "^FTSE"),
    ("DAX", "^GDAXI"),
    ("CAC 40", "^FCHI"),
    ("Nikkei 225", "^N225"),
    ("Hang Seng Index", "^HSI"),
    ("Shanghai Composite", "^SSEC"),
    ("S&P/ASX 200", "^AXJO"),
];

const CRYPTOS: &[(&str, &str)] = &[
    ("Bitcoin", "BTC-USD"),
    ("Ethereum", "ETH-USD"),
    ("Binance Coin", "BNB-USD"),
    ("Cardano", "ADA-USD"),
    ("Ripple", "XRP-USD"),
    ("Solana", "SOL-USD"),
    ("Polkadot", "DOT-USD"),
    ("Litecoin", "LTC-USD"),
    ("Chainlink", "LINK-USD"),
    ("Bitcoin Cash", "BCH-USD"),
];

const CURRENCIES: &[(&str, &str)] = &[
    ("CAD/USD", "CADUSD=X"),
    ("CAD/EUR", "CADEUR=X"),
    ("CAD/JPY", "CADJPY=X"),
    ("CAD/GBP", "CADGBP=X"),
    ("CAD/AUD", "CADAUD=X"),
    ("CAD/CHF", "CADCHF=X"),
    ("CAD/NZD", "CADNZD=X"),
    ("CAD/CNY", "CADCNY=X"),
    ("CAD/SEK", "CADSEK=X"),
    ("CAD/NOK", "CADNOK=X"),
];

const ETFS: &[(&str, &str)] = &[
    ("SPDR S&P 500 ETF Trust", "SPY"),
    ("iShares Core S&P 500 ETF", "IVV"),
    ("Vanguard Total Stock Market ETF", "VTI"),
    ("Invesco QQQ Trust", "QQQ"),
    ("Vanguard S&P 500 ETF", "VOO"),
    ("iShares Russell 2000 ETF", "IWM"),
    ("Vanguard FTSE Emerging Markets ETF", "VWO"),
    ("iShares MSCI EAFE ETF", "EFA"),
    ("iShares Core U.S. Aggregate Bond ETF", "AGG"),
    ("Vanguard Total Bond Market ETF", "BND"),
];

const MUTUAL_FUNDS: &[(&str, &str)] = &[
    ("Vanguard 500 Index Fund", "VFINX"),
    ("Fidelity 500 Index Fund", "FXAIX"),
    ("Vanguard Total Stock Market Index Fund", "VTSMX"),
    ("Dodge & Cox Stock Fund", "DODGX"),
    ("American Funds Growth Fund of America", "AGTHX"),
    ("T. Rowe Price Blue Chip Growth Fund", "TRBCX"),
    ("Vanguard Total International Stock Index Fund", "VGTSX"),
    ("PIMCO Total Return Fund", "PTTAX"),
    ("Vanguard Total Bond Market Index Fund", "VBMFX"),
    ("Franklin Income Fund", "FKINX"),
];

const TREASURY_YIELDS: &[(&str, &str)] = &[
    ("13-Week Treasury Bill", "^IRX"),
    ("5-Year Treasury Note", "^FVX"),
    ("CBOE 10-Year Treasury Note", "^TNX"),
    ("30-Year Treasury Bond", "^TYX"),
];

const SECTOR_ETFS: &[(&str, &str)] = &[
    ("Technology", "XLK"),
    ("Healthcare", "XLV"),
    ("Financials", "XLF"),
    ("Consumer Discretionary", "XLY"),
    ("Consumer Staples", "XLP"),
    ("Energy", "XLE"),
    ("Industrials", "XLI"),
    ("Materials", "XLB"),
    ("Utilities", "XLU"),
    ("Real Estate", "XLRE"),
];

const CANADIAN_EQUITIES: &[(&str, &str)] = &[
    ("Royal Bank of Canada", "RY.TO"),
    ("Toronto-Dominion Bank", "TD.TO"),
    ("Enbridge", "ENB.TO"),
    ("Canadian National Railway", "CNR.TO"),
    ("Shopify", "SHOP.TO"),
    ("Bank of Nova Scotia", "BNS.TO"),
    ("Bank of Montreal", "BMO.TO"),
    ("Canadian Pacific Kansas City", "CP.TO"),
    ("Thomson Reuters", "TRI.TO"),
    ("Suncor Energy", "SU.TO"),
];

const SP500_CONSTITUENTS: &[(&str, &str)] = &[
    ("Apple", "AAPL"),
    ("Microsoft", "MSFT"),
    ("Amazon", "AMZN"),
    ("NVIDIA", "NVDA"),
    ("Alphabet", "GOOGL"),
    ("Meta Platforms", "META"),
    ("Berkshire Hathaway", "BRK-B"),
    ("Tesla", "TSLA"),
    ("UnitedHealth Group", "UNH"),
    ("JPMorgan Chase", "JPM"),
];

const BOND_ETFS: &[(&str, &str)] = &[
    ("Total Bond Market", "BND"),
    ("Short-Term Treasury", "SHY"),
    ("Intermediate-Term Treasury", "IEI"),
    ("Long-Term Treasury", "TLT"),
    ("Corporate Bonds", "LQD"),
    ("High-Yield Bonds", "HYG"),
    ("Municipal Bonds", "MUB"),
    ("Inflation-Protected Treasury (TIPS)", "TIP"),
    ("International Bonds", "BNDX"),
    ("Emerging Markets Bonds", "EMB"),
];

const COMMODITIES: &[(&str, &str)] = &[
    ("Crude Oil", "CL=F"),
    ("Brent Crude", "BZ=F"),
    ("Heating Oil", "HO=F"),
    ("Gasoline", "RB=F"),
    ("Natural Gas", "NG=F"),
    ("Gold", "GC=F"),
    ("Silver", "SI=F"),
    ("Copper", "HG=F"),
    ("Platinum", "PL=F"),
    ("Palladium", "PA=F"),
    ("Corn", "ZC=F"),
    ("Soybeans", "ZS=F"),
    ("Lumber", "LBS=F"),
    ("Cotton", "CT=F"),
    ("Sugar", "SB=F"),
    ("Coffee", "KC=F"),
    ("Live Cattle", "LE=F"),
    ("Feeder Cattle", "GF=F"),
    ("Lean Hogs", "HE=F"),
    ("Agriculture", "DBA"),
    ("Wheat", "ZW=F"),
    ("Potash (Nutrien Ltd.)", "NTR"),
    ("Uranium", "URA"),
    ("Aluminum", "ALI=F"),
];

fn table(asset_class: AssetClass) -> &'static [(&'static str, &'static str)] {
    match asset_class {
        AssetClass::Index => INDICES,
        AssetClass::Crypto => CRYPTOS,
        AssetClass::Currency => CURRENCIES,
        AssetClass::Etf => ETFS,
        AssetClass::MutualFund => MUTUAL_FUNDS,
        AssetClass::TreasuryYield => TREASURY_YIELDS,
        AssetClass::SectorEtf => SECTOR_ETFS,
        AssetClass::CanadianEquity => CANADIAN_EQUITIES,
        AssetClass::Sp500 => SP500_CONSTITUENTS,
        AssetClass::BondEtf => BOND_ETFS,
        AssetClass::Commodity => COMMODITIES,
    }
}

/// Pure lookup over the static tables. No state, no side effects.
pub struct Catalog;

impl Catalog {
    /// All instruments of one class, in table order.
    pub fn list(asset_class: AssetClass) -> Vec<Instrument> {
        table(asset_class)
            .iter()
            .map(|&(display_name, provider_symbol)| Instrument {
                display_name,
                provider_symbol,
                asset_class,
            })
            .collect()
    }

    /// Resolve a display name to its instrument within one class table.
    pub fn resolve(
        asset_class: AssetClass,
        display_name: &str,
    ) -> Result<Instrument, MarketLensError> {
        table(asset_class)
            .iter()
            .find(|&&(name, _)| name == display_name)
            .map(|&(name, symbol)| Instrument {
                display_name: name,
                provider_symbol: symbol,
                asset_class,
            })
            .ok_or_else(|| MarketLensError::UnknownInstrument {
                name: display_name.to_string(),
                asset_class: asset_class.to_string(),
            })
    }
}
