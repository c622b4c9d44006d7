use serde::Serialize;
use serde_json::{Map, Number, Value};
use thiserror::Error;
use time::OffsetDateTime;
use utoipa::ToSchema;
use validator::ValidateUrl;

use super::model::{Genre, MoviePatch, NewMovie};

pub const MIN_YEAR: i64 = 1900;
pub const MIN_RATE: f64 = 0.0;
pub const MAX_RATE: f64 = 10.0;
pub const DEFAULT_RATE: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    Required,
    InvalidType,
    TooSmall,
    TooBig,
    InvalidEnumValue,
    InvalidUrl,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldIssue {
    pub field: String,
    pub code: IssueCode,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid movie payload: {} violation(s)", .issues.len())]
pub struct SchemaError {
    pub issues: Vec<FieldIssue>,
}

impl SchemaError {
    pub fn single(field: &str, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldIssue {
                field: field.to_string(),
                code,
                message: message.into(),
            }],
        }
    }

    pub fn fields(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.field.as_str()).collect()
    }
}

pub fn validate_full(payload: &Value) -> Result<NewMovie, SchemaError> {
    let mut checker = Checker::new(payload, true)?;

    let title = checker.text("title");
    let year = checker.year();
    let director = checker.text("director");
    let duration = checker.duration();
    let rate = checker.rate();
    let poster = checker.poster();
    let genre = checker.genres();

    match (title, year, director, duration, poster, genre) {
        (Some(title), Some(year), Some(director), Some(duration), Some(poster), Some(genre))
            if checker.is_clean() =>
        {
            Ok(NewMovie {
                title,
                year,
                director,
                duration,
                rate: rate.unwrap_or_else(|| Number::from(DEFAULT_RATE)),
                poster,
                genre,
            })
        }
        _ => Err(checker.into_error()),
    }
}

pub fn validate_partial(payload: &Value) -> Result<MoviePatch, SchemaError> {
    let mut checker = Checker::new(payload, false)?;

    let patch = MoviePatch {
        title: checker.text("title"),
        year: checker.year(),
        director: checker.text("director"),
        duration: checker.duration(),
        rate: checker.rate(),
        poster: checker.poster(),
        genre: checker.genres(),
    };

    if checker.is_clean() {
        Ok(patch)
    } else {
        Err(checker.into_error())
    }
}

pub fn max_year() -> i64 {
    i64::from(OffsetDateTime::now_utc().year()) + 1
}

struct Checker<'a> {
    body: &'a Map<String, Value>,
    full: bool,
    issues: Vec<FieldIssue>,
}

impl<'a> Checker<'a> {
    fn new(payload: &'a Value, full: bool) -> Result<Self, SchemaError> {
        match payload {
            Value::Object(body) => Ok(Self {
                body,
                full,
                issues: Vec::new(),
            }),
            other => Err(SchemaError::single(
                "body",
                IssueCode::InvalidType,
                format!("Expected object, received {}", kind(other)),
            )),
        }
    }

    fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    fn into_error(self) -> SchemaError {
        SchemaError {
            issues: self.issues,
        }
    }

    fn push(&mut self, field: &str, code: IssueCode, message: impl Into<String>) {
        self.issues.push(FieldIssue {
            field: field.to_string(),
            code,
            message: message.into(),
        });
    }

    fn lookup(&mut self, field: &str, required: bool) -> Option<&'a Value> {
        let body = self.body;
        let value = body.get(field);
        if value.is_none() && required {
            self.push(field, IssueCode::Required, format!("Movie {field} is required"));
        }
        value
    }

    fn text(&mut self, field: &str) -> Option<String> {
        let value = self.lookup(field, self.full)?;
        let Some(text) = value.as_str() else {
            self.push(
                field,
                IssueCode::InvalidType,
                format!("Movie {field} must be a string, received {}", kind(value)),
            );
            return None;
        };
        if text.trim().is_empty() {
            self.push(field, IssueCode::TooSmall, format!("Movie {field} must not be empty"));
            return None;
        }
        Some(text.to_string())
    }

    fn integer(&mut self, field: &str, required: bool) -> Option<i64> {
        let value = self.lookup(field, required)?;
        if !value.is_number() {
            self.push(
                field,
                IssueCode::InvalidType,
                format!("Movie {field} must be a number, received {}", kind(value)),
            );
            return None;
        }
        let integer = as_integer(value);
        if integer.is_none() {
            self.push(
                field,
                IssueCode::InvalidType,
                format!("Movie {field} must be an integer"),
            );
        }
        integer
    }

    fn year(&mut self) -> Option<i32> {
        let year = self.integer("year", self.full)?;
        let max = max_year();
        if year < MIN_YEAR {
            self.push("year", IssueCode::TooSmall, format!("Movie year must be {MIN_YEAR} or later"));
            return None;
        }
        if year > max {
            self.push("year", IssueCode::TooBig, format!("Movie year must be {max} or earlier"));
            return None;
        }
        i32::try_from(year).ok()
    }

    fn duration(&mut self) -> Option<u32> {
        let duration = self.integer("duration", self.full)?;
        if duration <= 0 {
            self.push("duration", IssueCode::TooSmall, "Movie duration must be a positive number of minutes");
            return None;
        }
        match u32::try_from(duration) {
            Ok(minutes) => Some(minutes),
            Err(_) => {
                self.push("duration", IssueCode::TooBig, "Movie duration is too large");
                None
            }
        }
    }

    fn rate(&mut self) -> Option<Number> {
        let value = self.lookup("rate", false)?;
        let Some(number) = value.as_number() else {
            self.push(
                "rate",
                IssueCode::InvalidType,
                format!("Movie rate must be a number, received {}", kind(value)),
            );
            return None;
        };
        let rate = number.as_f64().unwrap_or(f64::NAN);
        if rate < MIN_RATE {
            self.push("rate", IssueCode::TooSmall, format!("Movie rate must be at least {MIN_RATE}"));
            return None;
        }
        if rate > MAX_RATE {
            self.push("rate", IssueCode::TooBig, format!("Movie rate must be at most {MAX_RATE}"));
            return None;
        }
        Some(number.clone())
    }

    fn poster(&mut self) -> Option<String> {
        let value = self.lookup("poster", self.full)?;
        let Some(poster) = value.as_str() else {
            self.push(
                "poster",
                IssueCode::InvalidType,
                format!("Movie poster must be a string, received {}", kind(value)),
            );
            return None;
        };
        if poster.is_empty() || !poster.validate_url() {
            self.push("poster", IssueCode::InvalidUrl, "Poster must be a valid URL");
            return None;
        }
        Some(poster.to_string())
    }

    fn genres(&mut self) -> Option<Vec<Genre>> {
        let value = self.lookup("genre", self.full)?;
        let Some(entries) = value.as_array() else {
            self.push(
                "genre",
                IssueCode::InvalidType,
                format!("Movie genre must be an array of genres, received {}", kind(value)),
            );
            return None;
        };
        if entries.is_empty() {
            self.push("genre", IssueCode::TooSmall, "Movie genre must contain at least one genre");
            return None;
        }

        let mut genres = Vec::with_capacity(entries.len());
        let mut valid = true;
        for (index, entry) in entries.iter().enumerate() {
            match entry.as_str() {
                Some(token) => match Genre::from_token(token) {
                    Some(genre) => genres.push(genre),
                    None => {
                        valid = false;
                        self.push(
                            "genre",
                            IssueCode::InvalidEnumValue,
                            format!(
                                "Invalid genre '{token}' at position {index}, expected one of {}",
                                known_genres()
                            ),
                        );
                    }
                },
                None => {
                    valid = false;
                    self.push(
                        "genre",
                        IssueCode::InvalidType,
                        format!("Genre at position {index} must be a string, received {}", kind(entry)),
                    );
                }
            }
        }
        valid.then_some(genres)
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
            .map(|f| f as i64)
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn known_genres() -> String {
    Genre::ALL
        .iter()
        .map(Genre::as_str)
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_payload() -> Value {
        json!({
            "title": "The Shawshank Redemption",
            "year": 1994,
            "director": "Frank Darabont",
            "duration": 142,
            "rate": 9.3,
            "poster": "https://i.ebayimg.com/images/g/4goAAOSwMyBe7hnQ/s-l1200.webp",
            "genre": ["Drama"]
        })
    }

    fn codes_for(err: &SchemaError, field: &str) -> Vec<IssueCode> {
        err.issues
            .iter()
            .filter(|i| i.field == field)
            .map(|i| i.code)
            .collect()
    }

    #[test]
    fn full_accepts_valid_payload() {
        let movie = validate_full(&valid_payload()).unwrap();
        assert_eq!(movie.title, "The Shawshank Redemption");
        assert_eq!(movie.year, 1994);
        assert_eq!(movie.duration, 142);
        assert_eq!(movie.rate.as_f64(), Some(9.3));
        assert_eq!(movie.genre, vec![Genre::Drama]);
    }

    #[test]
    fn full_defaults_missing_rate_to_zero() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("rate");
        let movie = validate_full(&payload).unwrap();
        assert_eq!(movie.rate, Number::from(DEFAULT_RATE));
    }

    #[test]
    fn full_ignores_client_supplied_id() {
        let mut payload = valid_payload();
        payload["id"] = json!("not-yours");
        assert!(validate_full(&payload).is_ok());
    }

    #[test]
    fn full_reports_every_missing_field() {
        let err = validate_full(&json!({})).unwrap_err();
        let mut fields = err.fields();
        fields.sort_unstable();
        assert_eq!(fields, vec!["director", "duration", "genre", "poster", "title", "year"]);
        assert!(err.issues.iter().all(|i| i.code == IssueCode::Required));
    }

    #[test]
    fn full_reports_all_violations_in_one_pass() {
        let payload = json!({
            "title": "Inception",
            "year": "2010",
            "director": "Christopher Nolan",
            "duration": 148,
            "poster": "not a url",
            "genre": []
        });
        let err = validate_full(&payload).unwrap_err();
        assert_eq!(codes_for(&err, "year"), vec![IssueCode::InvalidType]);
        assert_eq!(codes_for(&err, "poster"), vec![IssueCode::InvalidUrl]);
        assert_eq!(codes_for(&err, "genre"), vec![IssueCode::TooSmall]);
        assert_eq!(err.issues.len(), 3);
    }

    #[test]
    fn rejects_unknown_genre_token() {
        let mut payload = valid_payload();
        payload["genre"] = json!(["Drama", "Documentary", 7]);
        let err = validate_full(&payload).unwrap_err();
        assert_eq!(
            codes_for(&err, "genre"),
            vec![IssueCode::InvalidEnumValue, IssueCode::InvalidType]
        );
        assert!(err.issues[0].message.contains("Documentary"));
    }

    #[test]
    fn genre_membership_is_case_sensitive_on_write() {
        let mut payload = valid_payload();
        payload["genre"] = json!(["drama"]);
        let err = validate_full(&payload).unwrap_err();
        assert_eq!(codes_for(&err, "genre"), vec![IssueCode::InvalidEnumValue]);
    }

    #[test]
    fn year_bounds() {
        let mut payload = valid_payload();
        payload["year"] = json!(1899);
        let err = validate_full(&payload).unwrap_err();
        assert_eq!(codes_for(&err, "year"), vec![IssueCode::TooSmall]);

        payload["year"] = json!(max_year() + 1);
        let err = validate_full(&payload).unwrap_err();
        assert_eq!(codes_for(&err, "year"), vec![IssueCode::TooBig]);

        payload["year"] = json!(max_year());
        assert!(validate_full(&payload).is_ok());
    }

    #[test]
    fn year_must_be_integral() {
        let mut payload = valid_payload();
        payload["year"] = json!(1994.5);
        let err = validate_full(&payload).unwrap_err();
        assert_eq!(codes_for(&err, "year"), vec![IssueCode::InvalidType]);

        payload["year"] = json!(1994.0);
        assert_eq!(validate_full(&payload).unwrap().year, 1994);
    }

    #[test]
    fn duration_must_be_positive() {
        let mut payload = valid_payload();
        payload["duration"] = json!(0);
        let err = validate_full(&payload).unwrap_err();
        assert_eq!(codes_for(&err, "duration"), vec![IssueCode::TooSmall]);
    }

    #[test]
    fn rate_bounds() {
        let mut payload = valid_payload();
        payload["rate"] = json!(10.5);
        let err = validate_full(&payload).unwrap_err();
        assert_eq!(codes_for(&err, "rate"), vec![IssueCode::TooBig]);

        payload["rate"] = json!(-1);
        let err = validate_full(&payload).unwrap_err();
        assert_eq!(codes_for(&err, "rate"), vec![IssueCode::TooSmall]);

        payload["rate"] = json!(10);
        assert_eq!(validate_full(&payload).unwrap().rate, Number::from(10));

        payload["rate"] = json!(9.0);
        assert_eq!(validate_full(&payload).unwrap().rate.as_f64(), Some(9.0));
        assert!(validate_full(&payload).unwrap().rate.is_f64());
    }

    #[test]
    fn blank_text_is_rejected() {
        let mut payload = valid_payload();
        payload["title"] = json!("   ");
        payload["director"] = json!(null);
        let err = validate_full(&payload).unwrap_err();
        assert_eq!(codes_for(&err, "title"), vec![IssueCode::TooSmall]);
        assert_eq!(codes_for(&err, "director"), vec![IssueCode::InvalidType]);
    }

    #[test]
    fn non_object_payload_is_a_single_body_issue() {
        let err = validate_full(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.fields(), vec!["body"]);
        let err = validate_partial(&json!("title")).unwrap_err();
        assert_eq!(err.issues[0].code, IssueCode::InvalidType);
    }

    #[test]
    fn partial_accepts_empty_payload() {
        assert_eq!(validate_partial(&json!({})).unwrap(), MoviePatch::default());
    }

    #[test]
    fn partial_keeps_only_supplied_fields() {
        let patch = validate_partial(&json!({ "year": 2000, "id": "ignored" })).unwrap();
        assert_eq!(
            patch,
            MoviePatch {
                year: Some(2000),
                ..Default::default()
            }
        );
    }

    #[test]
    fn partial_does_not_default_rate() {
        let patch = validate_partial(&json!({ "title": "Heat" })).unwrap();
        assert_eq!(patch.rate, None);
    }

    #[test]
    fn partial_applies_field_rules() {
        let err = validate_partial(&json!({
            "year": "two thousand",
            "genre": ["Western"],
            "poster": 3
        }))
        .unwrap_err();
        let mut fields = err.fields();
        fields.sort_unstable();
        assert_eq!(fields, vec!["genre", "poster", "year"]);
        assert!(err.issues.iter().all(|i| i.code != IssueCode::Required));
    }

    #[test]
    fn issues_serialize_with_snake_case_codes() {
        let err = validate_partial(&json!({ "genre": "Drama" })).unwrap_err();
        let json = serde_json::to_value(&err.issues).unwrap();
        assert_eq!(json[0]["field"], "genre");
        assert_eq!(json[0]["code"], "invalid_type");
    }
}
