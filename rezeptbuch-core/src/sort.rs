use crate::error::UnknownSortPolicy;
use crate::taxonomy::Taxonomy;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

/// Fields the list ordering looks at.
pub trait Sortable {
    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn category(&self) -> &str;
    fn subcategory(&self) -> &str;
    fn created_at(&self) -> i64;
}

/// Order of `GET /api/recipes`.
///
/// Every policy ends with the record id as tie-break, so listing the same
/// rows twice always yields the same order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortPolicy {
    /// Category rank, then subcategory priority, then subcategory and title
    /// (case-insensitive)
    #[default]
    Ranked,
    /// Category rank, then subcategory and title (case-insensitive)
    Category,
    /// Creation time, newest first
    Newest,
}

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct RankKey {
    category: usize,
    subcategory_rank: usize,
    subcategory: String,
    title: String,
    id: String,
}

impl SortPolicy {
    pub fn sort<R: Sortable>(self, taxonomy: &Taxonomy, rows: &mut [R]) {
        match self {
            SortPolicy::Ranked | SortPolicy::Category => {
                rows.sort_by_cached_key(|row| self.rank_key(taxonomy, row));
            }
            SortPolicy::Newest => {
                rows.sort_by(|a, b| {
                    (Reverse(a.created_at()), a.id()).cmp(&(Reverse(b.created_at()), b.id()))
                });
            }
        }
    }

    fn rank_key<R: Sortable>(self, taxonomy: &Taxonomy, row: &R) -> RankKey {
        let subcategory_rank = match self {
            SortPolicy::Ranked => taxonomy.subcategory_rank(row.category(), row.subcategory()),
            _ => 0,
        };
        RankKey {
            category: taxonomy.category_rank(row.category()),
            subcategory_rank,
            subcategory: row.subcategory().to_lowercase(),
            title: row.title().to_lowercase(),
            id: row.id().to_string(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortPolicy::Ranked => "ranked",
            SortPolicy::Category => "category",
            SortPolicy::Newest => "newest",
        }
    }
}

impl fmt::Display for SortPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortPolicy {
    type Err = UnknownSortPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ranked" => Ok(SortPolicy::Ranked),
            "category" => Ok(SortPolicy::Category),
            "newest" | "newest_first" => Ok(SortPolicy::Newest),
            _ => Err(UnknownSortPolicy(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Row {
        id: &'static str,
        title: &'static str,
        category: &'static str,
        subcategory: &'static str,
        created_at: i64,
    }

    impl Sortable for Row {
        fn id(&self) -> &str {
            self.id
        }
        fn title(&self) -> &str {
            self.title
        }
        fn category(&self) -> &str {
            self.category
        }
        fn subcategory(&self) -> &str {
            self.subcategory
        }
        fn created_at(&self) -> i64 {
            self.created_at
        }
    }

    fn row(id: &'static str, category: &'static str, subcategory: &'static str) -> Row {
        Row {
            id,
            title: id,
            category,
            subcategory,
            created_at: 0,
        }
    }

    fn ids(rows: &[Row]) -> Vec<&'static str> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_ranked_orders_categories_by_taxonomy() {
        let mut rows = vec![
            row("d", "Drinks", ""),
            row("f", "Frühstück", ""),
            row("b", "Bakery", ""),
        ];
        SortPolicy::Ranked.sort(&Taxonomy::standard(), &mut rows);
        assert_eq!(ids(&rows), vec!["f", "b", "d"]);
    }

    #[test]
    fn test_ranked_unknown_category_last() {
        let mut rows = vec![
            row("x", "Aperitif", ""),
            row("s", "Snacks & Desserts", ""),
            row("h", "Hauptspeise", ""),
        ];
        SortPolicy::Ranked.sort(&Taxonomy::standard(), &mut rows);
        assert_eq!(ids(&rows), vec!["h", "s", "x"]);
    }

    #[test]
    fn test_ranked_uses_priority_table_before_alphabet() {
        let mut rows = vec![
            row("n", "Drinks", "Nicht-alkoholische Getränke"),
            row("e", "Drinks", ""),
            row("a", "Drinks", "Alkoholische Getränke"),
            row("s", "Frühstück", "Sonstiges"),
            row("b", "Frühstück", "Brot & Aufstriche"),
        ];
        SortPolicy::Ranked.sort(&Taxonomy::standard(), &mut rows);
        assert_eq!(ids(&rows), vec!["b", "s", "a", "n", "e"]);
    }

    #[test]
    fn test_category_policy_sorts_subcategories_alphabetically() {
        let mut rows = vec![
            row("s", "Frühstück", "Sonstiges"),
            row("b", "Frühstück", "brot & Aufstriche"),
            row("e", "Frühstück", ""),
        ];
        SortPolicy::Category.sort(&Taxonomy::standard(), &mut rows);
        assert_eq!(ids(&rows), vec!["e", "b", "s"]);
    }

    #[test]
    fn test_titles_compare_case_insensitively() {
        let mut rows = vec![
            Row {
                title: "zimtschnecken",
                ..row("1", "Bakery", "Kuchen & Torten")
            },
            Row {
                title: "Apfelkuchen",
                ..row("2", "Bakery", "Kuchen & Torten")
            },
            Row {
                title: "brownies",
                ..row("3", "Bakery", "Kuchen & Torten")
            },
        ];
        SortPolicy::Ranked.sort(&Taxonomy::standard(), &mut rows);
        assert_eq!(ids(&rows), vec!["2", "3", "1"]);
    }

    #[test]
    fn test_full_ties_break_on_id() {
        let mut rows = vec![
            Row {
                title: "Tee",
                ..row("tee-2", "Drinks", "")
            },
            Row {
                title: "Tee",
                ..row("tee-1", "Drinks", "")
            },
        ];
        SortPolicy::Ranked.sort(&Taxonomy::standard(), &mut rows);
        assert_eq!(ids(&rows), vec!["tee-1", "tee-2"]);
    }

    #[test]
    fn test_newest_first() {
        let mut rows = vec![
            Row {
                created_at: 10,
                ..row("old", "Frühstück", "")
            },
            Row {
                created_at: 30,
                ..row("new", "Drinks", "")
            },
            Row {
                created_at: 20,
                ..row("mid", "Bakery", "")
            },
        ];
        SortPolicy::Newest.sort(&Taxonomy::standard(), &mut rows);
        assert_eq!(ids(&rows), vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let taxonomy = Taxonomy::standard();
        let mut rows = vec![
            row("c", "Hauptspeise", "Pizza"),
            row("a", "Drinks", "Alkoholische Getränke"),
            row("b", "Hauptspeise", "Pasta & Nudeln"),
            row("d", "Frühstück", ""),
        ];
        SortPolicy::Ranked.sort(&taxonomy, &mut rows);
        let first = ids(&rows);
        SortPolicy::Ranked.sort(&taxonomy, &mut rows);
        assert_eq!(ids(&rows), first);
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!("ranked".parse::<SortPolicy>(), Ok(SortPolicy::Ranked));
        assert_eq!(" Category ".parse::<SortPolicy>(), Ok(SortPolicy::Category));
        assert_eq!("newest".parse::<SortPolicy>(), Ok(SortPolicy::Newest));
        assert_eq!(
            "random".parse::<SortPolicy>(),
            Err(UnknownSortPolicy("random".to_string()))
        );
    }
}
