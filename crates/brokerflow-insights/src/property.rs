//! Property market analysis over appraisal reports.

use brokerflow_core::{DocumentType, ExtractionResult, Field};
use serde::Serialize;
use tracing::debug;

use crate::report::Analysis;
use crate::stats::{Histogram, dollar_range, mean, median, round2};

pub const NO_APPRAISAL_DATA: &str = "No appraisal data found";

/// Mean values below this suggest an affordable market.
pub const AFFORDABLE_MARKET_CEILING: f64 = 300_000.0;
/// Mean values above this suggest a premium market.
pub const PREMIUM_MARKET_FLOOR: f64 = 500_000.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketOverview {
    pub average_property_value: f64,
    pub median_property_value: f64,
    pub min_value: i64,
    pub max_value: i64,
    pub value_range: String,
    pub total_properties_analyzed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PropertyTrends {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_price_per_sqft: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_square_footage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popular_bedroom_count: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyInsight {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_overview: Option<MarketOverview>,
    pub property_trends: PropertyTrends,
    pub investment_opportunities: Vec<String>,
}

impl PropertyInsight {
    pub fn average_value(&self) -> Option<f64> {
        self.market_overview
            .as_ref()
            .map(|m| m.average_property_value)
    }
}

/// Summarise appraised values, price per square foot, and bedroom counts.
///
/// Values and footages are collected independently and paired by position
/// in extraction order; a pair is skipped when its footage is missing or zero.
pub fn property_market(batch: &[ExtractionResult]) -> Analysis<PropertyInsight> {
    let appraisals: Vec<&ExtractionResult> = batch
        .iter()
        .filter(|r| r.is(DocumentType::AppraisalReport))
        .collect();

    if appraisals.is_empty() {
        return Analysis::no_data(NO_APPRAISAL_DATA);
    }
    debug!(appraisals = appraisals.len(), "analysing property market");

    let values: Vec<i64> = appraisals
        .iter()
        .filter_map(|r| r.integer(Field::AppraisedValue))
        .collect();
    let footages: Vec<i64> = appraisals
        .iter()
        .filter_map(|r| r.integer(Field::SquareFeet))
        .collect();
    let bedrooms: Histogram<i64> = appraisals
        .iter()
        .filter_map(|r| r.integer(Field::Bedrooms))
        .collect();

    let market_overview = market_overview(&values);
    let mut property_trends = PropertyTrends {
        popular_bedroom_count: bedrooms.mode().copied(),
        ..PropertyTrends::default()
    };

    let per_sqft: Vec<f64> = values
        .iter()
        .zip(&footages)
        .filter(|(_, sqft)| **sqft > 0)
        .map(|(&value, &sqft)| value as f64 / sqft as f64)
        .collect();
    if let Some(avg) = mean(&per_sqft) {
        let sqft: Vec<f64> = footages.iter().map(|&s| s as f64).collect();
        property_trends.average_price_per_sqft = Some(round2(avg));
        property_trends.average_square_footage = mean(&sqft).map(round2);
    }

    let investment_opportunities = property_opportunities(market_overview.as_ref());

    Analysis::Ready(PropertyInsight {
        market_overview,
        property_trends,
        investment_opportunities,
    })
}

fn market_overview(values: &[i64]) -> Option<MarketOverview> {
    let as_f64: Vec<f64> = values.iter().map(|&v| v as f64).collect();
    let average = mean(&as_f64)?;
    let middle = median(&as_f64)?;
    let min_value = *values.iter().min()?;
    let max_value = *values.iter().max()?;

    Some(MarketOverview {
        average_property_value: round2(average),
        median_property_value: round2(middle),
        min_value,
        max_value,
        value_range: dollar_range(min_value, max_value),
        total_properties_analyzed: values.len(),
    })
}

fn property_opportunities(overview: Option<&MarketOverview>) -> Vec<String> {
    let Some(avg) = overview
        .map(|m| m.average_property_value)
        .filter(|&v| v != 0.0)
    else {
        return Vec::new();
    };

    if avg < AFFORDABLE_MARKET_CEILING {
        vec!["Focus on first-time homebuyer programs in affordable market".to_string()]
    } else if avg > PREMIUM_MARKET_FLOOR {
        vec!["Target high-net-worth clients in premium market".to_string()]
    } else {
        Vec::new()
    }
}
