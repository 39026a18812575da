use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::layout::{ChartLayout, tooltip_lines};
use crate::domain::{
    activity::{ChartSeries, StatsSummary},
    chart::{ChartOptions, ChartSurface, DatasetSpec},
    logging::LogComponent,
};

const BACKGROUND: &str = "#ffffff";
const GRID: &str = "#e5e5e5";
const TEXT: &str = "#666666";

struct CanvasState {
    context: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    options: ChartOptions,
    series: ChartSeries,
    caption: Option<String>,
    hover: Option<usize>,
}

/// Canvas 2D line chart for the hourly alerts/trades series.
///
/// Hovering shows one tooltip with every series at the hovered hour.
pub struct CanvasChartSurface {
    state: Rc<RefCell<CanvasState>>,
    _listeners: Vec<EventListener>,
}

impl CanvasChartSurface {
    /// `None` when the page has no such canvas, or it has no 2D context.
    pub fn from_element_id(canvas_id: &str) -> Option<Self> {
        let canvas = web_sys::window()?
            .document()?
            .get_element_by_id(canvas_id)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        Self::from_canvas(canvas)
    }

    pub fn from_canvas(canvas: HtmlCanvasElement) -> Option<Self> {
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        let state = Rc::new(RefCell::new(CanvasState {
            context,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
            options: ChartOptions::default(),
            series: ChartSeries::default(),
            caption: None,
            hover: None,
        }));

        let on_move = {
            let state = Rc::clone(&state);
            EventListener::new(&canvas, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let mut state = state.borrow_mut();
                let layout = ChartLayout::new(state.width, state.height, &state.series, &state.options);
                let hover = layout.index_at(event.offset_x() as f64);
                if hover != state.hover {
                    state.hover = hover;
                    state.paint();
                }
            })
        };
        let on_leave = {
            let state = Rc::clone(&state);
            EventListener::new(&canvas, "mouseleave", move |_| {
                let mut state = state.borrow_mut();
                if state.hover.take().is_some() {
                    state.paint();
                }
            })
        };

        Some(Self {
            state,
            _listeners: vec![on_move, on_leave],
        })
    }

    pub fn series(&self) -> ChartSeries {
        self.state.borrow().series.clone()
    }

    pub fn caption(&self) -> Option<String> {
        self.state.borrow().caption.clone()
    }
}

impl ChartSurface for CanvasChartSurface {
    fn configure(&mut self, options: &ChartOptions) {
        let mut state = self.state.borrow_mut();
        state.options = options.clone();
        state.series = ChartSeries::default();
        state.paint();
    }

    fn draw(&mut self, series: &ChartSeries) {
        let mut state = self.state.borrow_mut();
        state.series = series.clone();
        state.hover = None;
        state.paint();
    }

    fn show_summary(&mut self, summary: &StatsSummary) {
        self.state.borrow_mut().caption = Some(summary.headline());
    }
}

impl CanvasState {
    fn paint(&self) {
        if let Err(e) = self.try_paint() {
            crate::log_error!(LogComponent::Infrastructure("CanvasChart"), "Failed to paint chart: {e:?}");
        }
    }

    fn try_paint(&self) -> Result<(), JsValue> {
        let ctx = &self.context;
        let layout = ChartLayout::new(self.width, self.height, &self.series, &self.options);

        ctx.clear_rect(0.0, 0.0, self.width, self.height);
        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, self.width, self.height);

        self.paint_grid(&layout)?;
        self.paint_legend()?;

        if self.series.is_empty() {
            ctx.set_fill_style_str(TEXT);
            ctx.set_font("14px sans-serif");
            ctx.fill_text("No activity data", layout.left + 10.0, layout.top + layout.plot_height / 2.0)?;
            return Ok(());
        }

        self.paint_line(&layout, &self.options.alerts, &self.series.alert_counts);
        self.paint_line(&layout, &self.options.trades, &self.series.trade_counts);

        if let Some(index) = self.hover {
            self.paint_tooltip(&layout, index)?;
        }
        Ok(())
    }

    fn paint_grid(&self, layout: &ChartLayout) -> Result<(), JsValue> {
        let ctx = &self.context;
        ctx.set_line_width(1.0);
        ctx.set_font("11px sans-serif");

        for tick in layout.y_labels() {
            let y = layout.y_for(tick);
            ctx.set_stroke_style_str(GRID);
            ctx.begin_path();
            ctx.move_to(layout.left, y);
            ctx.line_to(layout.right(), y);
            ctx.stroke();

            ctx.set_fill_style_str(TEXT);
            ctx.fill_text(&tick.to_string(), 8.0, y + 4.0)?;
        }

        for index in layout.x_label_indices() {
            if let Some(label) = self.series.labels.get(index) {
                ctx.fill_text(label, layout.x_for(index) - 14.0, layout.bottom() + 16.0)?;
            }
        }
        Ok(())
    }

    fn paint_legend(&self) -> Result<(), JsValue> {
        let ctx = &self.context;
        ctx.set_font("12px sans-serif");
        let mut x = 40.0;
        for dataset in [&self.options.alerts, &self.options.trades] {
            ctx.set_fill_style_str(dataset.color);
            ctx.fill_rect(x, 16.0, 12.0, 12.0);
            ctx.set_fill_style_str(TEXT);
            ctx.fill_text(dataset.label, x + 18.0, 26.0)?;
            x += 90.0;
        }
        if let Some(caption) = &self.caption {
            ctx.set_font("11px sans-serif");
            ctx.set_text_align("right");
            let drawn = ctx.fill_text(caption, self.width - 40.0, 26.0);
            ctx.set_text_align("start");
            drawn?;
        }
        Ok(())
    }

    fn paint_line(&self, layout: &ChartLayout, dataset: &DatasetSpec, values: &[u32]) {
        let ctx = &self.context;

        // Area under the line first, so the stroke stays on top.
        ctx.set_fill_style_str(dataset.fill);
        ctx.begin_path();
        ctx.move_to(layout.x_for(0), layout.bottom());
        for (index, &value) in values.iter().enumerate() {
            ctx.line_to(layout.x_for(index), layout.y_for(value));
        }
        ctx.line_to(layout.x_for(values.len().saturating_sub(1)), layout.bottom());
        ctx.close_path();
        ctx.fill();

        ctx.set_stroke_style_str(dataset.color);
        ctx.set_line_width(2.0);
        ctx.begin_path();
        for (index, &value) in values.iter().enumerate() {
            let (x, y) = (layout.x_for(index), layout.y_for(value));
            if index == 0 {
                ctx.move_to(x, y);
            } else {
                ctx.line_to(x, y);
            }
        }
        ctx.stroke();
    }

    fn paint_tooltip(&self, layout: &ChartLayout, index: usize) -> Result<(), JsValue> {
        let Some(lines) = tooltip_lines(&self.series, &self.options, index) else {
            return Ok(());
        };
        let ctx = &self.context;
        let x = layout.x_for(index);

        ctx.set_stroke_style_str(GRID);
        ctx.set_line_width(1.0);
        ctx.begin_path();
        ctx.move_to(x, layout.top);
        ctx.line_to(x, layout.bottom());
        ctx.stroke();

        let box_width = 110.0;
        let box_height = 16.0 * lines.len() as f64 + 8.0;
        let box_x = if x + box_width + 8.0 > layout.right() { x - box_width - 8.0 } else { x + 8.0 };
        ctx.set_fill_style_str("rgba(0, 0, 0, 0.8)");
        ctx.fill_rect(box_x, layout.top, box_width, box_height);

        ctx.set_fill_style_str("#ffffff");
        ctx.set_font("12px sans-serif");
        for (row, line) in lines.iter().enumerate() {
            ctx.fill_text(line, box_x + 8.0, layout.top + 18.0 + 16.0 * row as f64)?;
        }
        Ok(())
    }
}
