use async_trait::async_trait;
use chrono::NaiveDate;

use crate::clients::gemini_client;
use crate::error::Result;

#[async_trait]
pub trait ScheduleGenerator: Send + Sync {
    /// Free-text schedule for `date`, given the day's formatted event lines.
    async fn generate(&self, date: NaiveDate, events: &[String]) -> Result<String>;
}

pub fn build_schedule_prompt(date: NaiveDate, events: &[String]) -> String {
    format!(
        "{date}の予定は以下の通りです：\n\
         \n\
         {events}\n\
         \n\
         これらの予定を考慮して、以下の点に注意しながら1日のスケジュールを立ててください：\n\
         1. 予定の間に適切な休憩時間を入れてください。\n\
         2. 朝食、昼食、夕食の時間を確保してください。\n\
         3. バイト先に行くのに1時間、帰るのに1時間かかるので、その時間を確保してください。\n\
         4. 予定で指定された時間以外はバイトをいれることができません。\n\
         5. 睡眠時間を8時間確保してください。\n\
         6. スケジュールは必ず「**HH:MM-HH:MM 活動内容**」の形式で記述してください。例: **07:00-08:00 朝食**\n\
         7. 備考を出力しないでください。\n\
         8. バイトの予定がないとき、移動時間を入れないでください。\n\
         9. 移動時間は、バイトの時間に含まれません。\n\
         \n\
         スケジュール：\n",
        date = date.format("%Y年%m月%d日"),
        events = events.join("\n"),
    )
}

pub struct GeminiService {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiService {
    pub fn new(http: reqwest::Client, api_key: String, model: String) -> Self {
        Self {
            http,
            base_url: gemini_client::GEMINI_BASE_URL.to_string(),
            model,
            api_key,
        }
    }
}

#[async_trait]
impl ScheduleGenerator for GeminiService {
    async fn generate(&self, date: NaiveDate, events: &[String]) -> Result<String> {
        let prompt = build_schedule_prompt(date, events);
        gemini_client::generate_content(&self.http, &self.base_url, &self.model, &self.api_key, &prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_date_events_and_format() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 8).unwrap();
        let events = vec!["10:00～12:00: ゼミ".to_string(), "終日: 文化祭".to_string()];
        let prompt = build_schedule_prompt(date, &events);

        assert!(prompt.starts_with("2026年10月08日の予定は以下の通りです："));
        assert!(prompt.contains("10:00～12:00: ゼミ\n終日: 文化祭"));
        assert!(prompt.contains("**HH:MM-HH:MM 活動内容**"));
        assert!(prompt.trim_end().ends_with("スケジュール："));
    }
}
