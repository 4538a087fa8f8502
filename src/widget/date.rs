use chrono::{Datelike, Local, NaiveDate, Weekday};

use crate::config::DateStyle;

/// The date line under the title, formatted once when the widget mounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayDate(String);

impl DisplayDate {
    pub fn today(style: DateStyle) -> Self {
        Self::for_date(Local::now().date_naive(), style)
    }

    pub fn for_date(date: NaiveDate, style: DateStyle) -> Self {
        let text = match style {
            DateStyle::Korean => format!(
                "{}년 {}월 {}일 {}",
                date.year(),
                date.month(),
                date.day(),
                korean_weekday(date.weekday())
            ),
            DateStyle::Iso => date.format("%Y-%m-%d").to_string(),
            DateStyle::English => date.format("%A, %B %-d, %Y").to_string(),
        };
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn korean_weekday(w: Weekday) -> &'static str {
    match w {
        Weekday::Mon => "월요일",
        Weekday::Tue => "화요일",
        Weekday::Wed => "수요일",
        Weekday::Thu => "목요일",
        Weekday::Fri => "금요일",
        Weekday::Sat => "토요일",
        Weekday::Sun => "일요일",
    }
}
