pub struct FigureInfo {
    pub name: &'static str,
    pub label: &'static str,
}

pub const FIGURE_MAP: &[FigureInfo] = &[
    FigureInfo {
        name: "rack",
        label: "Rack",
    },
    FigureInfo {
        name: "cooler",
        label: "Cooler",
    },
    FigureInfo {
        name: "raised_floor",
        label: "Raised Floor",
    },
    FigureInfo {
        name: "electrical_panel",
        label: "Electrical Panel",
    },
    FigureInfo {
        name: "perforated_tile",
        label: "Perforated Tile",
    },
];

pub fn get_figure_label(name: &str) -> String {
    FIGURE_MAP
        .iter()
        .find(|f| f.name == name)
        .map_or("unknown", |f| f.label)
        .to_string()
}
