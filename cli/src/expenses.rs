use std::fmt::Write as _;

use tracing::warn;

use crate::config::Weekday;

/// Expense category, keyed by the first byte of a token (`f120` is food, 120).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Food,
    Game,
    Movie,
    Stationery,
    Transportation,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Game,
        Category::Movie,
        Category::Stationery,
        Category::Transportation,
    ];

    pub fn from_prefix(b: u8) -> Option<Self> {
        match b {
            b'f' => Some(Category::Food),
            b'g' => Some(Category::Game),
            b'm' => Some(Category::Movie),
            b's' => Some(Category::Stationery),
            b't' => Some(Category::Transportation),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Game => "game",
            Category::Movie => "movie",
            Category::Stationery => "stationery",
            Category::Transportation => "transportation",
        }
    }
}

/// Per-category sums over a set of lines.
///
/// Amounts parse as `i64`; sums are kept in `i128` so no realistic input
/// can overflow them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpenseTotals {
    amounts: [i128; 5],
    pub lines: usize,
}

impl ExpenseTotals {
    pub fn get(&self, category: Category) -> i128 {
        self.amounts[category as usize]
    }

    pub fn total(&self) -> i128 {
        self.amounts.iter().sum()
    }

    /// Mean total per input line; 0 when there were no lines.
    pub fn average_per_line(&self) -> f64 {
        if self.lines == 0 {
            0.0
        } else {
            self.total() as f64 / self.lines as f64
        }
    }

    fn add_line(&mut self, line_no: usize, line: &str) {
        for (category, amount) in line_amounts(line_no, line) {
            self.amounts[category as usize] += i128::from(amount);
        }
        self.lines += 1;
    }
}

/// Categorized amounts on one line. Unknown prefixes are ignored.
///
/// Every occurrence of the category letter is stripped before parsing, so
/// `f1f2` reads as food 12. A known prefix with an unparseable amount is
/// logged and counts as 0.
fn line_amounts(line_no: usize, line: &str) -> impl Iterator<Item = (Category, i64)> + '_ {
    line.split_whitespace().filter_map(move |token| {
        let prefix = token.as_bytes()[0];
        let category = Category::from_prefix(prefix)?;
        let digits = token.replace(char::from(prefix), "");
        let amount = match digits.parse::<i64>() {
            Ok(n) => n,
            Err(e) => {
                warn!(line = line_no, token, error = %e, "ignoring unparseable expense amount");
                0
            }
        };
        Some((category, amount))
    })
}

/// Sum every category across all lines.
pub fn summarize<S: AsRef<str>>(lines: &[S]) -> ExpenseTotals {
    let mut totals = ExpenseTotals::default();
    for (i, line) in lines.iter().enumerate() {
        totals.add_line(i + 1, line.as_ref());
    }
    totals
}

/// Total spending per weekday. Line `i` is the day `i` days after `first_day`.
pub fn summarize_by_day<S: AsRef<str>>(lines: &[S], first_day: Weekday) -> [i128; 7] {
    let mut by_day = [0i128; 7];
    for (i, line) in lines.iter().enumerate() {
        let day = (first_day.index() + i) % 7;
        by_day[day] += line_amounts(i + 1, line.as_ref())
            .map(|(_, n)| i128::from(n))
            .sum::<i128>();
    }
    by_day
}

/// Average line, one line per category, then the grand total.
pub fn render_summary(totals: &ExpenseTotals) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:.2}", totals.average_per_line());
    for category in Category::ALL {
        let _ = writeln!(out, "{} {}", category.name(), totals.get(category));
    }
    let _ = writeln!(out, "TOTAL {}", totals.total());
    out
}

/// One `Mon N` line per weekday, Monday first.
pub fn render_by_day(by_day: &[i128; 7]) -> String {
    let mut out = String::new();
    for day in Weekday::ALL {
        let _ = writeln!(out, "{} {}", day.short_name(), by_day[day.index()]);
    }
    out
}
