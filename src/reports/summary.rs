//! Grouping and summing over a slice of expenses
//!
//! All functions are pure. Groups come back in first-seen order.

use std::collections::HashMap;
use std::hash::Hash;

use crate::models::{Expense, Money, Month};

/// Running total for one group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTotal<K> {
    pub key: K,
    pub total: Money,
    pub count: usize,
}

/// Totals keyed by `K`, iterated in the order keys were first added
#[derive(Debug, Clone)]
pub struct OrderedTotals<K> {
    groups: Vec<GroupTotal<K>>,
    index: HashMap<K, usize>,
}

impl<K> Default for OrderedTotals<K> {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> OrderedTotals<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an amount to `key`, creating the group on first sight
    pub fn add(&mut self, key: K, amount: Money) {
        match self.index.get(&key) {
            Some(&i) => {
                let group = &mut self.groups[i];
                group.total += amount;
                group.count += 1;
            }
            None => {
                self.index.insert(key.clone(), self.groups.len());
                self.groups.push(GroupTotal {
                    key,
                    total: amount,
                    count: 1,
                });
            }
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroupTotal<K>> {
        self.groups.iter()
    }

    /// Sum over every group
    pub fn grand_total(&self) -> Money {
        self.groups.iter().map(|g| g.total).sum()
    }

    /// Key/total pairs in first-seen order
    pub fn pairs(&self) -> Vec<(K, Money)> {
        self.groups
            .iter()
            .map(|g| (g.key.clone(), g.total))
            .collect()
    }
}

impl<K: Eq + Hash + Clone> FromIterator<(K, Money)> for OrderedTotals<K> {
    fn from_iter<I: IntoIterator<Item = (K, Money)>>(iter: I) -> Self {
        let mut totals = Self::new();
        for (key, amount) in iter {
            totals.add(key, amount);
        }
        totals
    }
}

/// Totals per category; categories are matched exactly (case and whitespace kept)
pub fn by_category(records: &[Expense]) -> OrderedTotals<String> {
    records
        .iter()
        .map(|e| (e.category.clone(), e.amount))
        .collect()
}

/// Sum of all amounts; zero for an empty ledger
pub fn total(records: &[Expense]) -> Money {
    records.iter().map(|e| e.amount).sum()
}

/// Totals per calendar month of the expense date
pub fn by_month(records: &[Expense]) -> OrderedTotals<Month> {
    records.iter().map(|e| (e.month(), e.amount)).collect()
}

/// Share of `part` in `whole` as a percentage; zero when `whole` is zero
pub fn percentage(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        0.0
    } else {
        (part.cents() as f64 / whole.cents() as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expense(cents: i64, category: &str, date: &str) -> Expense {
        Expense::new(
            Money::from_cents(cents),
            category,
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        )
        .unwrap()
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense(1250, "Food", "2024-03-01"),
            expense(4000, "Transport", "2024-03-15"),
            expense(999, "Food", "2024-04-02"),
        ]
    }

    #[test]
    fn test_by_category_example() {
        let totals = by_category(&sample());
        assert_eq!(
            totals.pairs(),
            vec![
                ("Food".to_string(), Money::from_cents(2249)),
                ("Transport".to_string(), Money::from_cents(4000)),
            ]
        );
        assert_eq!(totals.iter().next().unwrap().count, 2);
    }

    #[test]
    fn test_total_example() {
        assert_eq!(total(&sample()), Money::from_cents(6249));
        assert_eq!(total(&[]), Money::zero());
    }

    #[test]
    fn test_by_month_example() {
        let totals = by_month(&sample());
        let pairs: Vec<(String, Money)> = totals
            .pairs()
            .into_iter()
            .map(|(m, t)| (m.to_string(), t))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("2024-03".to_string(), Money::from_cents(5250)),
                ("2024-04".to_string(), Money::from_cents(999)),
            ]
        );
    }

    #[test]
    fn test_first_seen_order_not_sorted() {
        let records = vec![
            expense(100, "Rent", "2024-05-01"),
            expense(100, "Books", "2024-01-01"),
            expense(100, "Rent", "2023-12-01"),
        ];

        let categories: Vec<String> = by_category(&records).pairs().into_iter().map(|p| p.0).collect();
        assert_eq!(categories, vec!["Rent", "Books"]);

        let months: Vec<String> = by_month(&records)
            .pairs()
            .into_iter()
            .map(|p| p.0.to_string())
            .collect();
        assert_eq!(months, vec!["2024-05", "2024-01", "2023-12"]);
    }

    #[test]
    fn test_category_match_is_exact() {
        let records = vec![
            expense(100, "Food", "2024-03-01"),
            expense(200, "food", "2024-03-01"),
            expense(300, "Food ", "2024-03-01"),
        ];
        assert_eq!(by_category(&records).len(), 3);
    }

    #[test]
    fn test_groupings_partition_total() {
        let records = vec![
            expense(1, "A", "2023-01-31"),
            expense(22, "B", "2023-02-01"),
            expense(333, "A", "2023-02-28"),
            expense(4444, "C", "2024-02-29"),
            expense(0, "B", "2024-12-31"),
        ];

        let sum = total(&records);
        assert_eq!(by_category(&records).grand_total(), sum);
        assert_eq!(by_month(&records).grand_total(), sum);
    }

    #[test]
    fn test_empty_groupings() {
        assert!(by_category(&[]).is_empty());
        assert!(by_month(&[]).is_empty());
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(Money::from_cents(50), Money::from_cents(200)), 25.0);
        assert_eq!(percentage(Money::from_cents(50), Money::zero()), 0.0);
    }
}
