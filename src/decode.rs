use serde::Deserialize;
use serde_yaml::Value;
use thiserror::Error;

use crate::models::{ChangeRecord, ChangeType, PullRequest};

/// Why a changelog block failed to decode.
///
/// Decoding is all-or-nothing per pull request: the caller absorbs any of
/// these by substituting a single fallback record, it never propagates
/// them. One malformed entry invalidating the whole block surfaces the
/// authoring mistake instead of silently dropping the entry.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("changelog block is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("changelog entry is not a mapping")]
    NotAMapping,
    #[error("changelog entry is missing required key `{0}`")]
    MissingKey(&'static str),
    #[error("changelog entry value for `{0}` is not a string")]
    NotAString(&'static str),
    #[error("changelog entry has an empty `{0}`")]
    EmptyField(&'static str),
    #[error("changelog block contains no entries")]
    Empty,
}

/// Decode extracted block text into change records.
///
/// The block is a stream of YAML documents separated by `---`. Each
/// document must be a mapping carrying `module` and `description`;
/// `type` and `note` are optional. `pull_request` is always forced from
/// the pull request itself, even if the document carries one.
pub fn decode_changes(block: &str, pr: &PullRequest) -> Result<Vec<ChangeRecord>, DecodeError> {
    let mut records = Vec::new();

    for document in serde_yaml::Deserializer::from_str(block) {
        let value = Value::deserialize(document)?;
        records.push(decode_document(&value, pr)?);
    }

    if records.is_empty() {
        return Err(DecodeError::Empty);
    }

    Ok(records)
}

/// Project one document onto a record through an explicit allow-list of
/// keys; unrecognized keys are ignored for forward compatibility.
fn decode_document(value: &Value, pr: &PullRequest) -> Result<ChangeRecord, DecodeError> {
    if !value.is_mapping() {
        return Err(DecodeError::NotAMapping);
    }

    let module = required_str(value, "module")?;
    let description = required_str(value, "description")?;
    // A missing or unrecognized type normalizes to unknown rather than
    // failing the block; only structurally bad values are errors.
    let change_type = ChangeType::parse(optional_str(value, "type")?.unwrap_or(""));
    let note = optional_str(value, "note")?
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    let record = ChangeRecord {
        module: module.to_string(),
        change_type,
        description: description.trim().to_string(),
        pull_request: pr.url.clone(),
        number: pr.number,
        note,
    };

    if record.module.is_empty() {
        return Err(DecodeError::EmptyField("module"));
    }
    if record.description.is_empty() {
        return Err(DecodeError::EmptyField("description"));
    }

    Ok(record)
}

fn required_str<'a>(value: &'a Value, key: &'static str) -> Result<&'a str, DecodeError> {
    let field = value.get(key).ok_or(DecodeError::MissingKey(key))?;
    field.as_str().ok_or(DecodeError::NotAString(key))
}

fn optional_str<'a>(value: &'a Value, key: &'static str) -> Result<Option<&'a str>, DecodeError> {
    match value.get(key) {
        Some(field) => field.as_str().map(Some).ok_or(DecodeError::NotAString(key)),
        None => Ok(None),
    }
}
