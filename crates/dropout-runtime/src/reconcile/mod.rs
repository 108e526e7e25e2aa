//! Feature reconciliation
//!
//! Reconciles a partial user input against the full feature schema the model
//! expects. Every schema field ends up in the output, in schema order: the
//! user's value when supplied, otherwise the field's default-fill policy.

mod defaults;
mod reference;

pub use defaults::{DefaultSource, FixedDefaults, LayeredDefaults};
pub use reference::{ColumnStats, ReferenceDataset};

use crate::error::{Result, RuntimeError};
use dropout_core::{FeatureSchema, FillPolicy, ReconciledRecord, UserInput, ValueSource};
use tracing::debug;

/// Produce a complete, schema-ordered record from partial input
///
/// Fails with [`RuntimeError::UnknownField`] when the input names a field the
/// schema does not contain, [`RuntimeError::InvalidValue`] for non-finite
/// values, and [`RuntimeError::SchemaMismatch`] when a missing field cannot be
/// filled.
pub fn reconcile(
    user_input: &UserInput,
    schema: &FeatureSchema,
    default_source: &dyn DefaultSource,
) -> Result<ReconciledRecord> {
    for (name, value) in user_input.iter() {
        if !schema.contains(name) {
            return Err(RuntimeError::UnknownField(name.to_string()));
        }
        if !value.is_finite() {
            return Err(RuntimeError::InvalidValue {
                field: name.to_string(),
                reason: format!("{} is not a finite number", value),
            });
        }
    }

    let mut record = ReconciledRecord::with_capacity(schema.len());

    for field in schema.fields() {
        if let Some(value) = user_input.get(&field.name) {
            record.push(field.name.clone(), value, ValueSource::User);
            continue;
        }

        let value = match field.fill {
            FillPolicy::Fixed(value) => Some(value),
            FillPolicy::Median | FillPolicy::Mode => default_source.default_for(field),
        };

        match value {
            Some(value) => record.push(field.name.clone(), value, ValueSource::Filled(field.fill)),
            None => {
                return Err(RuntimeError::SchemaMismatch {
                    field: field.name.clone(),
                    policy: field.fill.name(),
                })
            }
        }
    }

    debug!(
        "Reconciled {} fields ({} from input, {} filled by default)",
        record.len(),
        record.len() - record.filled_count(),
        record.filled_count()
    );

    Ok(record)
}
