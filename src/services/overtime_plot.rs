use plotters::prelude::*;
use thiserror::Error;

use crate::domain::analysis::AnalysisResult;

/// Number of users shown in the overtime chart.
pub const TOP_OVERTIME_USERS: usize = 5;

#[derive(Error, Debug)]
pub enum OvertimePlotError {
    #[error("no user has overtime in this report")]
    NoOvertime,
    #[error("failed to render overtime plot: {0}")]
    Plot(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OvertimeBar {
    pub user_name: String,
    pub overtime_hours: f64,
}

/// Users with the most overtime, most first; users without overtime are left out.
pub fn top_overtime_users(analysis: &AnalysisResult) -> Vec<OvertimeBar> {
    let mut bars: Vec<OvertimeBar> = analysis
        .users
        .iter()
        .filter(|user| user.overtime_hours > 0.0)
        .map(|user| OvertimeBar {
            user_name: user.user_name.clone(),
            overtime_hours: user.overtime_hours,
        })
        .collect();
    bars.sort_by(|a, b| b.overtime_hours.total_cmp(&a.overtime_hours));
    bars.truncate(TOP_OVERTIME_USERS);
    bars
}

pub async fn plot_overtime_chart(analysis: &AnalysisResult, output_path: &str) -> Result<(), OvertimePlotError> {
    let bars = top_overtime_users(analysis);
    if bars.is_empty() {
        return Err(OvertimePlotError::NoOvertime);
    }

    let output_path = output_path.to_string();
    tokio::task::spawn_blocking(move || render_plot_png(&output_path, &bars))
        .await
        .map_err(|e| OvertimePlotError::Plot(e.to_string()))??;
    Ok(())
}

fn render_plot_png(output_path: &str, bars: &[OvertimeBar]) -> Result<(), OvertimePlotError> {
    let max_overtime = bars
        .iter()
        .map(|bar| bar.overtime_hours)
        .fold(0.0_f64, f64::max);
    let max_y = (max_overtime * 1.1).max(1.0);
    let max_x = bars.len() as i32;

    let root = BitMapBackend::new(output_path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| OvertimePlotError::Plot(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Top Overtime", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(65)
        .build_cartesian_2d(0..max_x, 0.0..max_y)
        .map_err(|e| OvertimePlotError::Plot(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("User")
        .y_desc("Overtime hours")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_labels(bars.len())
        .x_label_formatter(&|index| {
            usize::try_from(*index)
                .ok()
                .and_then(|idx| bars.get(idx))
                .map(|bar| bar.user_name.clone())
                .unwrap_or_default()
        })
        .draw()
        .map_err(|e| OvertimePlotError::Plot(e.to_string()))?;

    let bar_color = RGBColor(214, 69, 65);
    let bar_style = ShapeStyle::from(&bar_color).filled().stroke_width(1);
    chart
        .draw_series(bars.iter().enumerate().map(|(idx, bar)| {
            Rectangle::new(
                [(idx as i32, 0.0), (idx as i32 + 1, bar.overtime_hours)],
                bar_style.clone(),
            )
        }))
        .map_err(|e| OvertimePlotError::Plot(e.to_string()))?;

    root.present()
        .map_err(|e| OvertimePlotError::Plot(e.to_string()))?;
    Ok(())
}
