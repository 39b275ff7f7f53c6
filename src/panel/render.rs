use crate::config::PanelKind;
use crate::market::asset::{Asset, AssetList, AssetSourceKind};
use crate::panel::carousel::Carousel;
use bigdecimal::{BigDecimal, RoundingMode};

const ICON_URL_PREFIX: &str = "https://assets.coincap.io/assets/icons/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Positive,
    Negative,
}

impl Trend {
    pub fn of(change: &BigDecimal) -> Self {
        if *change < BigDecimal::from(0) {
            Trend::Negative
        } else {
            Trend::Positive
        }
    }

    fn arrow(self) -> &'static str {
        match self {
            Trend::Positive => "▲",
            Trend::Negative => "▼",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedAsset {
    pub symbol: String,
    pub price: String,
    pub change: String,
    pub trend: Trend,
    pub icon_url: Option<String>, // None hides the icon
}

impl RenderedAsset {
    pub fn from_asset(asset: &Asset) -> Self {
        Self {
            symbol: asset.symbol.clone(),
            price: format_price_usd(&asset.price_usd),
            change: format_change_percent(&asset.change_percent_24h),
            trend: Trend::of(&asset.change_percent_24h),
            icon_url: icon_url(&asset.symbol),
        }
    }

    fn change_magnitude(&self) -> &str {
        self.change.trim_start_matches(['+', '-'])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelView {
    Loading,
    Ready {
        page: usize,
        page_count: usize,
        source: AssetSourceKind,
        items: Vec<RenderedAsset>,
    },
}

impl PanelView {
    pub fn render(assets: Option<&AssetList>, carousel: &Carousel) -> Self {
        let list = match assets {
            Some(list) => list,
            None => return PanelView::Loading,
        };

        PanelView::Ready {
            page: carousel.current_index(list.len()),
            page_count: carousel.page_count(list.len()),
            source: list.source,
            items: carousel
                .current_page(&list.assets)
                .iter()
                .map(RenderedAsset::from_asset)
                .collect(),
        }
    }

    pub fn to_text(&self, kind: PanelKind) -> String {
        match kind {
            PanelKind::Ticker => self.ticker_text(),
            PanelKind::Sidebar => self.sidebar_text(),
        }
    }

    fn ticker_text(&self) -> String {
        match self {
            PanelView::Loading => "Loading market data...".to_string(),
            PanelView::Ready { items, .. } => items
                .iter()
                .map(|item| {
                    format!(
                        "{} {} {} {}",
                        item.symbol,
                        item.price,
                        item.trend.arrow(),
                        item.change_magnitude()
                    )
                })
                .collect::<Vec<_>>()
                .join("   "),
        }
    }

    fn sidebar_text(&self) -> String {
        match self {
            PanelView::Loading => "Crypto Daily\n  Loading...".to_string(),
            PanelView::Ready {
                page,
                page_count,
                items,
                ..
            } => {
                let mut lines = vec![format!("Crypto Daily [{}/{}]", page + 1, page_count)];
                lines.extend(items.iter().map(|item| {
                    format!(
                        "  {:<6} {:>14} {} {}",
                        item.symbol,
                        item.price,
                        item.trend.arrow(),
                        item.change
                    )
                }));
                lines.join("\n")
            }
        }
    }
}

// $64,231.45, two decimals rounded half-up
pub fn format_price_usd(price: &BigDecimal) -> String {
    let sign = if *price < BigDecimal::from(0) { "-" } else { "" };
    format!("{}${}", sign, format_two_decimals(&price.abs(), true))
}

pub fn format_change_percent(change: &BigDecimal) -> String {
    let sign = match Trend::of(change) {
        Trend::Positive => "+",
        Trend::Negative => "-",
    };
    format!("{}{}%", sign, format_two_decimals(&change.abs(), false))
}

pub fn icon_url(symbol: &str) -> Option<String> {
    if symbol.is_empty() || !symbol.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(format!("{}{}@2x.png", ICON_URL_PREFIX, symbol.to_ascii_lowercase()))
}

fn format_two_decimals(value: &BigDecimal, group_thousands: bool) -> String {
    let rounded = if value.fractional_digit_count() > 2 {
        value.with_scale_round(2, RoundingMode::HalfUp)
    } else {
        value.clone()
    };
    let (digits, _) = rounded.with_scale(2).as_bigint_and_exponent();
    let digits = format!("{:0>3}", digits.to_string().trim_start_matches('-'));
    let (int_part, frac_part) = digits.split_at(digits.len() - 2);

    if !group_thousands {
        return format!("{}.{}", int_part, frac_part);
    }

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{}.{}", grouped, frac_part)
}
