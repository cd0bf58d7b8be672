use crate::codec::{decode_day, decode_quote, encode_day, encode_quote};
use crate::models::Quote;
use crate::storage::KvStore;
use chrono::{Datelike, NaiveDate};
use rand::Rng;
use tracing::{debug, warn};

pub const QUOTE_KEY: &str = "dailyQuote";
pub const QUOTE_DATE_KEY: &str = "dailyQuoteDate";

pub const CATALOG: [(&str, &str); 10] = [
    ("成功不是終點，失敗不是末日，唯有勇氣才是永恆", "邱吉爾"),
    ("不要等待機會，而要創造機會", "佚名"),
    ("今天的努力是明天的希望", "佚名"),
    ("行動是治癒恐懼的良藥", "威廉·詹姆斯"),
    ("相信自己，你已經擁有所需的一切", "佚名"),
    ("小步前進，也是進步", "佚名"),
    ("困難只是偽裝的機會", "愛迪生"),
    ("保持好奇心，保持學習的心", "佚名"),
    ("今日事今日畢，明日又是新開始", "佚名"),
    ("堅持不懈，直到成功", "拿破崙·希爾"),
];

pub fn catalog_quote(index: usize) -> Quote {
    let (text, author) = CATALOG[index % CATALOG.len()];
    Quote {
        text: text.to_string(),
        author: author.to_string(),
    }
}

/// Whole days elapsed since `year_start`, 0 on the first day.
pub fn day_of_year(today: NaiveDate, year_start: NaiveDate) -> i64 {
    (today - year_start).num_days()
}

pub fn quote_index(today: NaiveDate, year_start: NaiveDate) -> usize {
    day_of_year(today, year_start).rem_euclid(CATALOG.len() as i64) as usize
}

/// Quote of the day, read from the cache when it is tagged with `today`.
pub fn quote_of_day<S: KvStore>(store: &mut S, today: NaiveDate) -> Quote {
    let year_start = today.with_ordinal0(0).unwrap_or(today);
    quote_of_day_since(store, today, year_start)
}

pub fn quote_of_day_since<S: KvStore>(store: &mut S, today: NaiveDate, year_start: NaiveDate) -> Quote {
    if let Some(quote) = cached_quote(store, today) {
        return quote;
    }

    let index = quote_index(today, year_start);
    let quote = catalog_quote(index);
    debug!(%today, index, "selected quote of the day");

    match encode_quote(&quote) {
        Ok(payload) => {
            let tag = encode_day(today);
            if let Err(err) = store.set_many(&[(QUOTE_KEY, payload.as_str()), (QUOTE_DATE_KEY, tag.as_str())]) {
                warn!("failed to cache daily quote: {err}");
            }
        }
        Err(err) => warn!("failed to encode daily quote: {err}"),
    }

    quote
}

/// Independent uniform draw; the daily cache is left untouched.
pub fn random_quote<R: Rng>(rng: &mut R) -> Quote {
    catalog_quote(rng.gen_range(0..CATALOG.len()))
}

fn cached_quote<S: KvStore>(store: &S, today: NaiveDate) -> Option<Quote> {
    let tagged = store.get(QUOTE_DATE_KEY).and_then(|raw| decode_day(&raw).ok())?;
    if tagged != today {
        return None;
    }
    store.get(QUOTE_KEY).and_then(|raw| decode_quote(&raw).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::Duration;
    use rand::{SeedableRng, rngs::StdRng};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn first_day_of_year_is_index_zero() {
        let today = day(2026, 1, 1);
        assert_eq!(day_of_year(today, day(2026, 1, 1)), 0);
        let mut store = MemoryStore::new();
        assert_eq!(quote_of_day(&mut store, today), catalog_quote(0));
    }

    #[test]
    fn same_day_returns_cached_quote() {
        let mut store = MemoryStore::new();
        let today = day(2026, 5, 17);
        let first = quote_of_day(&mut store, today);
        let second = quote_of_day(&mut store, today);
        assert_eq!(first, second);
        assert_eq!(store.get(QUOTE_DATE_KEY).as_deref(), Some("2026-05-17"));
    }

    #[test]
    fn cache_wins_over_computed_index() {
        let today = day(2026, 5, 17);
        let mut store = MemoryStore::with_entries([
            (QUOTE_KEY, r#"{"text":"Keep going","author":"Someone"}"#),
            (QUOTE_DATE_KEY, "2026-05-17"),
        ]);
        let quote = quote_of_day(&mut store, today);
        assert_eq!(quote.text, "Keep going");
    }

    #[test]
    fn stale_or_corrupt_cache_is_recomputed() {
        let today = day(2026, 5, 17);
        let expected = catalog_quote(quote_index(today, day(2026, 1, 1)));

        let mut stale = MemoryStore::with_entries([
            (QUOTE_KEY, r#"{"text":"Old","author":"Someone"}"#),
            (QUOTE_DATE_KEY, "2026-05-16"),
        ]);
        assert_eq!(quote_of_day(&mut stale, today), expected);

        let mut corrupt = MemoryStore::with_entries([(QUOTE_KEY, "{oops"), (QUOTE_DATE_KEY, "2026-05-17")]);
        assert_eq!(quote_of_day(&mut corrupt, today), expected);
        assert_eq!(stale.get(QUOTE_DATE_KEY).as_deref(), Some("2026-05-17"));
    }

    #[test]
    fn index_cycles_every_ten_days() {
        let start = day(2026, 1, 1);
        let today = day(2026, 2, 3);
        let later = today + Duration::days(10);
        assert_eq!(quote_index(today, start), quote_index(later, start));

        let mut a = MemoryStore::new();
        let mut b = MemoryStore::new();
        assert_eq!(quote_of_day(&mut a, today), quote_of_day(&mut b, later));
    }

    #[test]
    fn random_quote_leaves_cache_alone() {
        let mut store = MemoryStore::new();
        let today = day(2026, 7, 4);
        let daily = quote_of_day(&mut store, today);

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let drawn = random_quote(&mut rng);
            assert!(CATALOG.iter().any(|(text, _)| *text == drawn.text));
        }

        assert_eq!(quote_of_day(&mut store, today), daily);
    }
}
