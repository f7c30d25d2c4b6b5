use crate::calendar::{TimeSteps, TimeUnit, from_millis, grid_unit, iter_times};
use crate::layout::{Layout, ViewState, time_to_x};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub canvas_time_start: f64,
    pub canvas_time_end: f64,
    pub canvas_width: f64,
    pub height: f64,
    pub groups: Vec<GroupDump>,
    pub items: Vec<ItemDump>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis: Option<AxisDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDump {
    pub index: usize,
    pub top: f64,
    pub height: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDump {
    pub id: Option<String>,
    pub index: usize,
    pub group: Option<usize>,
    pub left: f64,
    pub width: f64,
    pub top: Option<f64>,
    pub height: f64,
    pub collision_left: f64,
    pub collision_width: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisDump {
    pub unit: TimeUnit,
    pub cells: Vec<CellDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellDump {
    pub start: String,
    pub end: String,
    pub left: f64,
    pub width: f64,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout, view: &ViewState) -> Self {
        let groups = layout
            .stack
            .group_tops
            .iter()
            .zip(&layout.stack.group_heights)
            .enumerate()
            .map(|(index, (top, height))| GroupDump {
                index,
                top: *top,
                height: *height,
            })
            .collect();

        let items = layout
            .items
            .iter()
            .map(|item| ItemDump {
                id: item.id.clone(),
                index: item.index,
                group: item.dimensions.order,
                left: item.dimensions.left,
                width: item.dimensions.width,
                top: item.dimensions.top,
                height: item.dimensions.height,
                collision_left: item.dimensions.collision_left,
                collision_width: item.dimensions.collision_width,
            })
            .collect();

        Self {
            canvas_time_start: view.canvas.start,
            canvas_time_end: view.canvas.end,
            canvas_width: view.canvas_width,
            height: layout.stack.height,
            groups,
            items,
            axis: None,
        }
    }

    /// Adds the grid cells a header would draw for this view.
    pub fn with_axis(mut self, view: &ViewState, steps: &TimeSteps) -> Self {
        let unit = grid_unit(&view.canvas, view.canvas_width, steps);
        let mut cells = Vec::new();
        let bounds = (from_millis(view.canvas.start), from_millis(view.canvas.end));
        if let (Some(start), Some(end)) = bounds {
            let to_x = |millis: i64| time_to_x(&view.canvas, view.canvas_width, millis as f64);
            for (cell_start, cell_end) in iter_times(start, end, unit, steps) {
                let left = to_x(cell_start.timestamp_millis());
                let right = to_x(cell_end.timestamp_millis());
                cells.push(CellDump {
                    start: cell_start.to_rfc3339(),
                    end: cell_end.to_rfc3339(),
                    left,
                    width: right - left,
                });
            }
        }
        self.axis = Some(AxisDump { unit, cells });
        self
    }
}

pub fn write_layout_dump(
    dump: &LayoutDump,
    output: Option<&Path>,
    pretty: bool,
) -> anyhow::Result<()> {
    match output {
        Some(path) if path != Path::new("-") => {
            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            write_json(&mut writer, dump, pretty)?;
            writer.flush()?;
        }
        _ => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_json(&mut writer, dump, pretty)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

fn write_json<W: Write>(writer: &mut W, dump: &LayoutDump, pretty: bool) -> serde_json::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, dump)
    } else {
        serde_json::to_writer(writer, dump)
    }
}
