//! Validation of the homework-statuses answer.
//!
//! Each step takes the output of the previous one and either narrows it or
//! returns the [`PollError`] describing what is wrong with the answer.

use crate::core::error::{PollError, ShapeError};
use crate::core::models::{Homework, HomeworkStatus};
use serde_json::Value;

const HOMEWORKS_KEY: &str = "homeworks";
const NAME_KEY: &str = "homework_name";
const STATUS_KEY: &str = "status";

/// Checks that the answer is an object whose `homeworks` is a list.
pub fn validate(response: &Value) -> Result<&[Value], PollError> {
    let object = response.as_object().ok_or(ShapeError::NotAnObject)?;

    let homeworks = object
        .get(HOMEWORKS_KEY)
        .and_then(Value::as_array)
        .ok_or(ShapeError::HomeworksNotAList)?;

    Ok(homeworks.as_slice())
}

/// The API lists the newest submission first.
pub fn extract_latest(homeworks: &[Value]) -> Result<&Value, PollError> {
    homeworks.first().ok_or(PollError::EmptyResult)
}

pub fn parse_homework(record: &Value) -> Result<Homework, PollError> {
    let name = required_text(record, NAME_KEY)?;
    let code = required_text(record, STATUS_KEY)?;

    let status =
        HomeworkStatus::from_code(code).ok_or_else(|| PollError::UnknownStatus(code.to_string()))?;

    Ok(Homework {
        name: name.to_string(),
        status,
    })
}

pub fn parse_status(record: &Value) -> Result<String, PollError> {
    parse_homework(record).map(|homework| homework.status_message())
}

/// Runs the whole chain on a raw answer.
pub fn latest_homework(response: &Value) -> Result<Homework, PollError> {
    let homeworks = validate(response)?;
    let record = extract_latest(homeworks)?;
    parse_homework(record)
}

fn required_text<'a>(record: &'a Value, key: &'static str) -> Result<&'a str, PollError> {
    record
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .ok_or(PollError::MissingField(key))
}
