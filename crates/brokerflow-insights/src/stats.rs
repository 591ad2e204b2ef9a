//! Descriptive statistics and currency formatting shared by the analyses.

use std::hash::Hash;

use indexmap::IndexMap;

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median; the mean of the two middle values for even lengths.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Frequency counts kept in first-seen order.
///
/// [`mode`](Self::mode) breaks ties in favour of the value seen first.
#[derive(Debug, Clone)]
pub struct Histogram<K: Eq + Hash> {
    counts: IndexMap<K, usize>,
}

impl<K: Eq + Hash> Histogram<K> {
    pub fn new() -> Self {
        Self {
            counts: IndexMap::new(),
        }
    }

    pub fn add(&mut self, key: K) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    /// Most frequent value; earliest-seen wins a tie.
    pub fn mode(&self) -> Option<&K> {
        let mut best: Option<(&K, usize)> = None;
        for (key, &count) in &self.counts {
            if best.is_none_or(|(_, b)| count > b) {
                best = Some((key, count));
            }
        }
        best.map(|(k, _)| k)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&K, usize)> {
        self.counts.iter().map(|(k, &c)| (k, c))
    }

    pub fn into_entries(self) -> Vec<(K, usize)> {
        self.counts.into_iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl<K: Eq + Hash> Default for Histogram<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> FromIterator<K> for Histogram<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut h = Self::new();
        for key in iter {
            h.add(key);
        }
        h
    }
}

/// `1234567` → `"1,234,567"`.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Whole-dollar amount with thousands separators: `88333.33` → `"$88,333"`.
pub fn format_dollars(value: f64) -> String {
    format!("${}", format_thousands(value.round() as i64))
}

/// `"$40,000 - $150,000"`.
pub fn dollar_range(min: i64, max: i64) -> String {
    format!("${} - ${}", format_thousands(min), format_thousands(max))
}
