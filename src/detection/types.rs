//! Detection type definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Class assigned to one segment by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Label {
    /// No kiwi call.
    Background,
    /// Female kiwi call.
    Female,
    /// Male kiwi call.
    Male,
}

impl Label {
    /// Integer tag used by serialized models.
    pub const fn tag(self) -> i64 {
        match self {
            Self::Background => 0,
            Self::Female => 1,
            Self::Male => 2,
        }
    }
}

impl TryFrom<i64> for Label {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Background),
            1 => Ok(Self::Female),
            2 => Ok(Self::Male),
            other => Err(format!("unknown class label: {other}")),
        }
    }
}

impl From<Label> for i64 {
    fn from(label: Label) -> Self {
        label.tag()
    }
}

/// Sex of a calling kiwi, i.e. a non-background label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    /// Female call.
    Female,
    /// Male call.
    Male,
}

impl Sex {
    /// Both sexes in reporting order.
    pub const ALL: [Self; 2] = [Self::Female, Self::Male];

    /// Label the classifier assigns to calls of this sex.
    pub const fn label(self) -> Label {
        match self {
            Self::Female => Label::Female,
            Self::Male => Label::Male,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Female => write!(f, "female"),
            Self::Male => write!(f, "male"),
        }
    }
}

/// Whole-recording call presence judgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// No repeated calls found.
    None,
    /// Only female bursts.
    Female,
    /// Only male bursts.
    Male,
    /// Both female and male bursts.
    #[serde(rename = "Male and Female")]
    MaleAndFemale,
}

impl Verdict {
    /// All verdicts in tally order.
    pub const ALL: [Self; 4] = [Self::Male, Self::Female, Self::MaleAndFemale, Self::None];

    const fn index(self) -> usize {
        match self {
            Self::Male => 0,
            Self::Female => 1,
            Self::MaleAndFemale => 2,
            Self::None => 3,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Female => write!(f, "Female"),
            Self::Male => write!(f, "Male"),
            Self::MaleAndFemale => write!(f, "Male and Female"),
        }
    }
}

/// Running count of verdicts produced by one finder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerdictTally {
    counts: [usize; 4],
}

impl VerdictTally {
    /// Count one more occurrence of `verdict`.
    pub fn record(&mut self, verdict: Verdict) {
        self.counts[verdict.index()] += 1;
    }

    /// Number of times `verdict` was recorded.
    pub fn count(&self, verdict: Verdict) -> usize {
        self.counts[verdict.index()]
    }

    /// Total number of recorded verdicts.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Iterate over `(verdict, count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Verdict, usize)> + '_ {
        Verdict::ALL.into_iter().map(|v| (v, self.count(v)))
    }
}

impl Serialize for VerdictTally {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(Verdict::ALL.len()))?;
        for (verdict, count) in self.iter() {
            map.serialize_entry(&verdict.to_string(), &count)?;
        }
        map.end()
    }
}

/// Time interval covered by one analysis segment, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Segment start time.
    pub start: f64,
    /// Segment end time.
    pub end: f64,
}

impl TimeRange {
    /// Create a new time range.
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
}

/// A detected call burst.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Burst start time in seconds.
    pub start: f64,
    /// Burst end time in seconds.
    pub end: f64,
    /// Calls per unit time over the burst.
    pub density: f64,
}

/// Half-open `[start, end)` run of segment indices where a condition holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// First index of the run.
    pub start: usize,
    /// One past the last index of the run.
    pub end: usize,
}

impl Region {
    /// Number of segments in the run.
    pub const fn len(self) -> usize {
        self.end - self.start
    }

    /// Always false for regions produced by [`contiguous_regions`](super::contiguous_regions).
    pub const fn is_empty(self) -> bool {
        self.start >= self.end
    }
}

/// Candidates found for each sex in one recording.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CallEvents {
    /// Female call bursts.
    pub females: Vec<Candidate>,
    /// Male call bursts.
    pub males: Vec<Candidate>,
}

impl CallEvents {
    /// Candidates for one sex.
    pub fn for_sex(&self, sex: Sex) -> &[Candidate] {
        match sex {
            Sex::Female => &self.females,
            Sex::Male => &self.males,
        }
    }

    /// Total number of candidates across both sexes.
    pub fn len(&self) -> usize {
        self.females.len() + self.males.len()
    }

    /// True when no candidate was found.
    pub fn is_empty(&self) -> bool {
        self.females.is_empty() && self.males.is_empty()
    }
}
