use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

pub type ArticleId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub publication_date: Option<NaiveDate>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub reading_time: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Values available to the filter controls.
///
/// `dates` is kept newest first, the order the backend returns them in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(default)]
    pub dates: Vec<NaiveDate>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl FilterSet {
    pub fn newest(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        self.dates.iter().position(|d| *d == date)
    }

    /// The date one step older than `date`, if there is one.
    pub fn older_than(&self, date: NaiveDate) -> Option<NaiveDate> {
        let index = self.position(date)?;
        self.dates.get(index + 1).copied()
    }

    /// The date one step newer than `date`, if there is one.
    pub fn newer_than(&self, date: NaiveDate) -> Option<NaiveDate> {
        let index = self.position(date)?;
        index.checked_sub(1).and_then(|i| self.dates.get(i).copied())
    }
}
