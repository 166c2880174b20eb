//! Typed predicate builder for the session filter query.
//!
//! Predicates are accumulated as `(column, operator, value)` triples and rendered into a
//! parameterized `WHERE` clause. Column names only ever come from [`Column`], values only
//! ever travel as bound parameters.

use sessionq::data::{FilterField, SessionFilter, Slicer};

/// Characters a blank value consists of: space plus the ASCII control whitespace.
pub const BLANK_CHARS: [char; 6] = [' ', '\t', '\n', '\u{0B}', '\u{0C}', '\r'];

/// Whether `value` is empty once [`BLANK_CHARS`] are trimmed off.
pub fn is_blank(value: &str) -> bool {
    value.trim_matches(BLANK_CHARS).is_empty()
}

/// SQL expression listing [`BLANK_CHARS`], for use as the second argument of `TRIM`.
fn sql_blank_chars() -> String {
    BLANK_CHARS
        .iter()
        .map(|c| format!("char({})", u32::from(*c)))
        .collect::<Vec<_>>()
        .join(" || ")
}

/// Columns of the `sessions` table that take part in predicates, stats and slicers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Topic,
    Tags,
    NextstepCategory,
    SessionLevel,
    SessionType,
    SpeakerName,
    RecordedStatus,
}

impl Column {
    pub const fn name(self) -> &'static str {
        match self {
            Column::Topic => "topic",
            Column::Tags => "tags",
            Column::NextstepCategory => "nextstep_category",
            Column::SessionLevel => "session_level",
            Column::SessionType => "session_type",
            Column::SpeakerName => "speaker_name",
            Column::RecordedStatus => "recorded_status",
        }
    }

    /// `column IS NOT NULL AND TRIM(column, <blank chars>) <> ''`
    pub fn non_blank(self) -> String {
        let name = self.name();
        format!(
            "{name} IS NOT NULL AND TRIM({name}, {}) <> ''",
            sql_blank_chars()
        )
    }
}

impl From<FilterField> for Column {
    fn from(field: FilterField) -> Self {
        match field {
            FilterField::Topic => Column::Topic,
            FilterField::Tag => Column::Tags,
            FilterField::LearningCategory => Column::NextstepCategory,
            FilterField::SessionLevel => Column::SessionLevel,
            FilterField::SessionType => Column::SessionType,
            FilterField::SpeakerName => Column::SpeakerName,
        }
    }
}

impl From<Slicer> for Column {
    fn from(slicer: Slicer) -> Self {
        match slicer {
            Slicer::Tags => Column::Tags,
            Slicer::LearningCategories => Column::NextstepCategory,
            Slicer::SessionLevels => Column::SessionLevel,
            Slicer::SessionTypes => Column::SessionType,
            Slicer::SpeakerNames => Column::SpeakerName,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Substring match, wildcards in the value are taken literally.
    Contains,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub column: Column,
    pub operator: Operator,
    pub value: String,
}

/// A rendered predicate list: `sql` is empty or starts with ` WHERE `.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhereClause {
    pub sql: String,
    pub params: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FilterBuilder {
    predicates: Vec<Predicate>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the predicate list for every non-blank parameter of `filter`.
    pub fn from_filter(filter: &SessionFilter) -> Self {
        filter
            .fields()
            .fold(Self::new(), |builder, (field, value)| {
                builder.contains(Column::from(field), value)
            })
    }

    /// Adds a contains predicate, unless `value` is absent or blank.
    pub fn contains(mut self, column: Column, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !is_blank(v)) {
            self.predicates.push(Predicate {
                column,
                operator: Operator::Contains,
                value: value.to_string(),
            });
        }
        self
    }

    pub fn render(&self) -> WhereClause {
        if self.predicates.is_empty() {
            return WhereClause::default();
        }

        let mut clauses = Vec::with_capacity(self.predicates.len());
        let mut params = Vec::with_capacity(self.predicates.len());
        for (index, predicate) in self.predicates.iter().enumerate() {
            let position = index + 1;
            match predicate.operator {
                Operator::Contains => {
                    clauses.push(format!(
                        r"{} LIKE '%' || ?{position} || '%' ESCAPE '\'",
                        predicate.column.name()
                    ));
                    params.push(escape_like(&predicate.value));
                }
            }
        }

        WhereClause {
            sql: format!(" WHERE {}", clauses.join(" AND ")),
            params,
        }
    }
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
