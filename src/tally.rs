//! Counting how often each item gets selected, against how often it should be.
use crate::selector::{Selector, SelectorResult};
use rand::Rng;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TallyRow<T> {
    pub item: T,
    pub weight: u64,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Tally<T> {
    rows: Vec<TallyRow<T>>,
    total_weight: u64,
    draws: u64,
}

impl<T: PartialEq + Clone> Tally<T> {
    /// Starts an empty tally for the given entries. Weights of repeated items are summed, as
    /// that is the share they get in a selector.
    pub fn new<'a, I>(entries: I) -> Tally<T>
    where
        I: IntoIterator<Item = &'a (T, u32)>,
        T: 'a,
    {
        let mut rows: Vec<TallyRow<T>> = vec![];
        for (item, weight) in entries {
            match rows.iter_mut().find(|row| row.item == *item) {
                Some(row) => row.weight += u64::from(*weight),
                None => rows.push(TallyRow {
                    item: item.clone(),
                    weight: u64::from(*weight),
                    count: 0,
                }),
            }
        }
        let total_weight = rows.iter().map(|row| row.weight).sum();
        Tally {
            rows,
            total_weight,
            draws: 0,
        }
    }

    pub fn record(&mut self, item: &T) {
        self.draws += 1;
        if let Some(row) = self.rows.iter_mut().find(|row| row.item == *item) {
            row.count += 1;
        } else {
            log::warn!("Selected an item the tally wasn't told about");
        }
    }

    /// Draws `draws` times from `selector`, recording each result.
    pub fn draw_from<S, R>(&mut self, selector: &S, draws: u64, rng: &mut R) -> SelectorResult<()>
    where
        S: Selector<T>,
        R: Rng + ?Sized,
    {
        for _ in 0..draws {
            let item = selector.select_with(rng)?;
            self.record(item);
        }
        Ok(())
    }
}

impl<T> Tally<T> {
    pub fn rows(&self) -> &[TallyRow<T>] {
        &self.rows
    }

    pub fn draws(&self) -> u64 {
        self.draws
    }

    pub fn expected_percent(&self, row: &TallyRow<T>) -> f64 {
        if self.total_weight == 0 {
            return 0.0;
        }
        100.0 * row.weight as f64 / self.total_weight as f64
    }

    pub fn observed_percent(&self, row: &TallyRow<T>) -> f64 {
        if self.draws == 0 {
            return 0.0;
        }
        100.0 * row.count as f64 / self.draws as f64
    }

    /// Largest gap, in percentage points, between expected and observed share.
    pub fn max_deviation(&self) -> f64 {
        self.rows
            .iter()
            .map(|row| (self.expected_percent(row) - self.observed_percent(row)).abs())
            .fold(0.0, f64::max)
    }
}

impl<T: fmt::Display> fmt::Display for Tally<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Item\tWeight\tExpected\tActual")?;
        for row in self.rows.iter() {
            writeln!(
                f,
                "{}\t{}\t{:>7.3}%\t{:>7.3}%",
                row.item,
                row.weight,
                self.expected_percent(row),
                self.observed_percent(row)
            )?;
        }
        Ok(())
    }
}
