use bigdecimal::{BigDecimal, RoundingMode, Zero};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::Deserialize;

use crate::models::{Trade, TradeStats};

/// Named statistics window. Ranges are inclusive and anchored at "today";
/// `All` applies no date filter at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsPeriod {
    Today,
    Week,
    Month,
    Year,
    #[default]
    All,
}

impl StatsPeriod {
    pub fn date_range(self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            StatsPeriod::Today => Some((today, today)),
            StatsPeriod::Week => Some((today.week(Weekday::Mon).first_day(), today)),
            StatsPeriod::Month => Some((today.with_day(1).unwrap_or(today), today)),
            StatsPeriod::Year => Some((today.with_ordinal(1).unwrap_or(today), today)),
            StatsPeriod::All => None,
        }
    }
}

/// Aggregate a snapshot of one user's trades.
///
/// "Closed" means profit is recorded, whatever the position. A breakeven
/// trade (profit exactly zero) counts toward the closed total but neither
/// win nor loss, so it dilutes the win rate. That is the intended contract,
/// not an oversight.
pub fn compute(trades: &[Trade]) -> TradeStats {
    let buy_count = trades.iter().filter(|t| t.position.is_buy()).count() as i64;
    let sell_count = trades.iter().filter(|t| t.position.is_sell()).count() as i64;

    let closed: Vec<&BigDecimal> = trades.iter().filter_map(|t| t.profit.as_ref()).collect();
    let zero = BigDecimal::zero();
    let win_count = closed.iter().filter(|p| ***p > zero).count() as i64;
    let loss_count = closed.iter().filter(|p| ***p < zero).count() as i64;

    let total_profit: BigDecimal = closed.iter().fold(BigDecimal::zero(), |acc, p| acc + *p);

    let win_rate = if closed.is_empty() {
        0.0
    } else {
        win_count as f64 / closed.len() as f64 * 100.0
    };

    let average_profit = if closed.is_empty() {
        BigDecimal::zero()
    } else {
        (total_profit.clone() / BigDecimal::from(closed.len() as u64))
            .with_scale_round(4, RoundingMode::HalfUp)
    };

    TradeStats {
        total_trades: trades.len() as i64,
        buy_count,
        sell_count,
        win_count,
        loss_count,
        win_rate,
        total_profit,
        average_profit,
        best_trade: closed.iter().max().map(|p| (*p).clone()).unwrap_or_else(BigDecimal::zero),
        worst_trade: closed.iter().min().map(|p| (*p).clone()).unwrap_or_else(BigDecimal::zero),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Position;
    use chrono::Utc;
    use uuid::Uuid;

    fn dec(s: &str) -> BigDecimal {
        s.parse().unwrap()
    }

    fn trade(position: Position, profit: Option<&str>) -> Trade {
        let now = Utc::now();
        Trade {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            trade_date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            ticker: "AAPL".into(),
            position,
            quantity: dec("10"),
            entry_price: dec("189.50"),
            exit_price: None,
            profit: profit.map(dec),
            reason: None,
            retrospective: None,
            rating: None,
            retrospective_updated_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_single_winning_sell() {
        let trades = vec![
            trade(Position::Buy, None),
            trade(Position::Sell, Some("87.00")),
        ];
        let stats = compute(&trades);
        assert_eq!(stats.total_trades, 2);
        assert_eq!(stats.buy_count, 1);
        assert_eq!(stats.sell_count, 1);
        assert_eq!(stats.win_count, 1);
        assert_eq!(stats.loss_count, 0);
        assert_eq!(stats.win_rate, 100.0);
        assert_eq!(stats.total_profit, dec("87.00"));
        assert_eq!(stats.average_profit, dec("87.00"));
        assert_eq!(stats.best_trade, dec("87.00"));
        assert_eq!(stats.worst_trade, dec("87.00"));
    }

    #[test]
    fn test_breakeven_dilutes_win_rate_but_counts_closed() {
        let trades = vec![
            trade(Position::Buy, None),
            trade(Position::Sell, Some("87.00")),
            trade(Position::Sell, Some("0.00")),
        ];
        let stats = compute(&trades);
        assert_eq!(stats.total_trades, 3);
        assert_eq!(stats.win_count, 1);
        assert_eq!(stats.loss_count, 0);
        assert_eq!(stats.win_rate, 50.0);
        assert_eq!(stats.total_profit, dec("87.00"));
        assert_eq!(stats.average_profit, dec("43.50"));
    }

    #[test]
    fn test_no_closed_trades_yields_zeroes() {
        let trades = vec![trade(Position::Buy, None), trade(Position::Buy, None)];
        let stats = compute(&trades);
        assert_eq!(stats.total_trades, 2);
        assert_eq!(stats.win_rate, 0.0);
        assert_eq!(stats.total_profit, BigDecimal::zero());
        assert_eq!(stats.average_profit, BigDecimal::zero());
        assert_eq!(stats.best_trade, BigDecimal::zero());
        assert_eq!(stats.worst_trade, BigDecimal::zero());
    }

    #[test]
    fn test_decimal_sum_is_exact_over_fractional_cents() {
        // 0.001 three times must come out to exactly 0.003.
        let trades = vec![
            trade(Position::Sell, Some("0.001")),
            trade(Position::Sell, Some("0.001")),
            trade(Position::Sell, Some("0.001")),
        ];
        let stats = compute(&trades);
        assert_eq!(stats.total_profit, dec("0.003"));
        assert_eq!(stats.average_profit, dec("0.0010"));
    }

    #[test]
    fn test_average_rounds_half_up_to_four_places() {
        let trades = vec![
            trade(Position::Sell, Some("0.0001")),
            trade(Position::Sell, Some("0.0000")),
        ];
        // 0.00005 rounds up to 0.0001 at scale 4.
        let stats = compute(&trades);
        assert_eq!(stats.average_profit, dec("0.0001"));
    }

    #[test]
    fn test_best_and_worst_with_losses() {
        let trades = vec![
            trade(Position::Sell, Some("-12.50")),
            trade(Position::Sell, Some("30.00")),
            trade(Position::Sell, Some("-3.25")),
        ];
        let stats = compute(&trades);
        assert_eq!(stats.win_count, 1);
        assert_eq!(stats.loss_count, 2);
        assert_eq!(stats.best_trade, dec("30.00"));
        assert_eq!(stats.worst_trade, dec("-12.50"));
        assert_eq!(stats.total_profit, dec("14.25"));
    }

    #[test]
    fn test_invariants_hold() {
        let trades = vec![
            trade(Position::Buy, None),
            trade(Position::Sell, Some("5")),
            trade(Position::Sell, Some("-5")),
            trade(Position::Sell, Some("0")),
        ];
        let stats = compute(&trades);
        let closed = 3;
        assert!(stats.win_count + stats.loss_count <= closed);
        assert!(closed <= stats.total_trades);
        assert!((0.0..=100.0).contains(&stats.win_rate));
    }

    #[test]
    fn test_week_range_starts_monday() {
        // 2025-06-05 is a Thursday.
        let today = NaiveDate::from_ymd_opt(2025, 6, 5).unwrap();
        let (start, end) = StatsPeriod::Week.date_range(today).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
        assert_eq!(end, today);
    }

    #[test]
    fn test_month_year_today_ranges() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 5).unwrap();
        assert_eq!(StatsPeriod::Today.date_range(today), Some((today, today)));
        assert_eq!(
            StatsPeriod::Month.date_range(today),
            Some((NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(), today))
        );
        assert_eq!(
            StatsPeriod::Year.date_range(today),
            Some((NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), today))
        );
        assert_eq!(StatsPeriod::All.date_range(today), None);
    }

    #[test]
    fn test_monday_week_range_is_single_day() {
        let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert_eq!(StatsPeriod::Week.date_range(monday), Some((monday, monday)));
    }
}
