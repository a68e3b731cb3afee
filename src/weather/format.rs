use super::models::{ForecastDay, LiveConditions, WeatherReport};

/// Forecast entries rendered regardless of how many days were requested
pub const FORECAST_DISPLAY_LIMIT: usize = 3;

const MISSING: &str = "N/A";

/// Render a report as the text handed back to the agent host
pub fn format_report(report: &WeatherReport, include_forecast: bool) -> String {
    let Some(live) = &report.live else {
        return format!("无法获取 {} 的天气信息", report.city);
    };

    let mut lines = live_lines(&report.city, live);

    if include_forecast && !report.forecast.is_empty() {
        lines.push("\n📅 天气预报:".to_string());
        lines.extend(
            report
                .forecast
                .iter()
                .take(FORECAST_DISPLAY_LIMIT)
                .map(forecast_line),
        );
    }

    lines.join("\n")
}

fn live_lines(city: &str, live: &LiveConditions) -> Vec<String> {
    let or_missing = |v: &Option<String>| v.as_deref().unwrap_or(MISSING).to_string();

    vec![
        format!("📍 城市: {}", city),
        format!("🌡️ 温度: {}°C", or_missing(&live.temperature)),
        format!("💧 湿度: {}%", or_missing(&live.humidity)),
        format!(
            "🌬️ 风力: {} {}级",
            or_missing(&live.wind_power),
            live.wind_direction.as_deref().unwrap_or_default()
        ),
        format!("☁️ 天气: {}", or_missing(&live.weather)),
        format!("👁️ 能见度: {}米", or_missing(&live.visibility)),
        format!("📊 报告时间: {}", or_missing(&live.report_time)),
    ]
}

fn forecast_line(day: &ForecastDay) -> String {
    let text = |v: &Option<String>| v.as_deref().unwrap_or_default().to_string();

    format!(
        "  {} (周{}): ☀️{} {}°C / 🌙{} {}°C",
        text(&day.date),
        text(&day.week),
        text(&day.day_weather),
        text(&day.day_temp),
        text(&day.night_weather),
        text(&day.night_temp),
    )
}
