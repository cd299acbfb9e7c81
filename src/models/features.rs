//! Transaction risk features
//!
//! The eleven derived fields the scoring oracle computes per transaction.
//! The same struct is the `features` object of the oracle response and the
//! feature columns of the persisted record, so merging is field-for-field.

use serde::{Deserialize, Serialize};

/// Feature bundle returned by the scoring oracle.
///
/// Every field is optional: the oracle omits what it could not compute
/// (e.g. travel velocity without coordinates).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TransactionFeatures {
    pub f_amount_zscore: Option<f64>,
    pub f_amount_to_avg_ratio: Option<f64>,
    pub f_travel_velocity_kmh: Option<f64>,
    pub f_travel_distance_km: Option<f64>,
    pub f_txn_count_1h: Option<i32>,
    pub f_txn_count_24h: Option<i32>,
    pub f_txn_count_7d: Option<i32>,
    pub f_seconds_since_last_txn: Option<f64>,
    pub f_hour_of_day: Option<i32>,
    // 0/1 flags, as the oracle encodes them
    pub f_is_new_device: Option<i32>,
    pub f_is_new_merchant: Option<i32>,
}

impl TransactionFeatures {
    /// Merge a bundle onto this feature set.
    ///
    /// Copies each present field of `bundle`; fields the bundle omitted
    /// keep their current value. A present field is never overwritten
    /// with an absent one, so the merge is monotonic.
    pub fn merge(&mut self, bundle: &TransactionFeatures) {
        merge_field(&mut self.f_amount_zscore, &bundle.f_amount_zscore);
        merge_field(&mut self.f_amount_to_avg_ratio, &bundle.f_amount_to_avg_ratio);
        merge_field(&mut self.f_travel_velocity_kmh, &bundle.f_travel_velocity_kmh);
        merge_field(&mut self.f_travel_distance_km, &bundle.f_travel_distance_km);
        merge_field(&mut self.f_txn_count_1h, &bundle.f_txn_count_1h);
        merge_field(&mut self.f_txn_count_24h, &bundle.f_txn_count_24h);
        merge_field(&mut self.f_txn_count_7d, &bundle.f_txn_count_7d);
        merge_field(&mut self.f_seconds_since_last_txn, &bundle.f_seconds_since_last_txn);
        merge_field(&mut self.f_hour_of_day, &bundle.f_hour_of_day);
        merge_field(&mut self.f_is_new_device, &bundle.f_is_new_device);
        merge_field(&mut self.f_is_new_merchant, &bundle.f_is_new_merchant);
    }
}

fn merge_field<T: Clone>(target: &mut Option<T>, source: &Option<T>) {
    if let Some(value) = source {
        *target = Some(value.clone());
    }
}
