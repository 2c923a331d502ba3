//! Year -> typhoon -> schedule selection over the typhoon forecast list
//!
//! Each level offers its options in first-appearance order. An unset level
//! falls back to its first option, so an empty [`Selection`] resolves to the
//! first schedule of the first typhoon of the first year.

use crate::domain::{MooringRecord, TyphoonInfo};

/// User choices; `None` means "first available"
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub year: Option<String>,
    pub typhoon: Option<String>,
    pub schedule: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TyphoonCatalog {
    infos: Vec<TyphoonInfo>,
}

impl TyphoonCatalog {
    pub fn new(infos: Vec<TyphoonInfo>) -> Self {
        Self { infos }
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    /// Distinct years
    pub fn years(&self) -> Vec<String> {
        let mut years: Vec<String> = Vec::new();
        for info in &self.infos {
            if !years.contains(&info.year) {
                years.push(info.year.clone());
            }
        }
        years
    }

    /// Typhoon keys (`"{number}호_{name}"`) for a year
    pub fn typhoons(&self, year: &str) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for info in self.infos.iter().filter(|i| i.year == year) {
            let key = typhoon_key(info);
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }

    /// Schedule keys (`"MM-DD-R{revision}"`) for a typhoon
    pub fn schedules(&self, year: &str, typhoon: &str) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for info in self.revisions(year, typhoon) {
            let key = schedule_key(info);
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }

    fn revisions<'a>(
        &'a self,
        year: &str,
        typhoon: &str,
    ) -> impl Iterator<Item = &'a TyphoonInfo> {
        self.infos
            .iter()
            .filter(move |i| i.year == year && typhoon_key(i) == typhoon)
    }

    /// Resolve a selection to a forecast revision
    ///
    /// When two revisions share a schedule key the later one wins.
    pub fn resolve(&self, selection: &Selection) -> Option<&TyphoonInfo> {
        let year = match &selection.year {
            Some(y) => y.clone(),
            None => self.years().into_iter().next()?,
        };
        let typhoon = match &selection.typhoon {
            Some(t) => t.clone(),
            None => self.typhoons(&year).into_iter().next()?,
        };
        let schedule = match &selection.schedule {
            Some(s) => s.clone(),
            None => self.schedules(&year, &typhoon).into_iter().next()?,
        };

        self.revisions(&year, &typhoon)
            .filter(|i| schedule_key(i) == schedule)
            .last()
    }
}

pub fn typhoon_key(info: &TyphoonInfo) -> String {
    format!("{}호_{}", info.base_number(), info.name)
}

pub fn schedule_key(info: &TyphoonInfo) -> String {
    let month = info.month_date.get(0..2).unwrap_or_default();
    let day = info.month_date.get(2..4).unwrap_or_default();
    format!("{}-{}-R{}", month, day, info.revision().unwrap_or("0"))
}

/// Key under which mooring schedules for a forecast revision are stored
pub fn mooring_key(info: &TyphoonInfo) -> String {
    format!("{}_{}", info.year, info.typhoon_no)
}

/// Mooring records belonging to a forecast revision
pub fn moorings_for(records: &[MooringRecord], info: &TyphoonInfo) -> Vec<MooringRecord> {
    let key = mooring_key(info);
    records
        .iter()
        .filter(|r| r.year_typhoon_no == key)
        .cloned()
        .collect()
}
