use excerpta::{
    FilterState, Language, MatchMode, Page, Record, RecordStore, SearchResultVerbose, display_label,
    sentence_tags, truncate,
};

const EXCERPT_MAX: usize = 300;

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub struct Report<'a, 's> {
    pub store: &'s RecordStore,
    pub state: &'a FilterState,
    pub language: Language,
    pub result: &'a SearchResultVerbose<'s>,
    pub page: &'a Page<'a, &'s Record>,
}

pub fn print_search(report: &Report<'_, '_>, color: bool) {
    let palette = ansi::Palette::new(color);
    let query = report.state.to_params().to_query_string();
    let shown = if query.is_empty() { "(no filters)".to_string() } else { format!("?{query}") };
    println!(
        "\n{}",
        palette.bold(palette.paint(format!("⚙  Browsing [{}]: {}", report.language, shown), ansi::CYAN))
    );

    println!("\n{}", palette.paint("━━━ Filters ━━━", ansi::GRAY));
    print_filters(report, &palette);

    println!("\n{}", palette.paint("━━━ Tag rail ━━━", ansi::GRAY));
    print_rail(report, &palette);

    println!("\n{}", palette.paint("━━━ Results ━━━", ansi::GRAY));
    if report.page.items.is_empty() {
        println!("{}", palette.dim("  No matching excerpts"));
    } else {
        print_results(report, &palette);
    }

    let details = &report.result.details;
    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Prefilter: {}  │  Filter: {}  │  Rank: {}  │  Facets: {}",
        palette.paint(format!("{:?}", details.total), ansi::GREEN),
        palette.dim(format!("{:?}", details.prefilter)),
        palette.dim(format!("{:?}", details.filter)),
        palette.dim(format!("{:?}", details.rank)),
        palette.dim(format!("{:?}", details.facets)),
    );
    println!(
        "  Candidates: {}  │  Matched: {}  │  Author gate: {}",
        palette.paint(details.candidates.to_string(), ansi::BLUE),
        palette.paint(report.result.total.to_string(), ansi::BLUE),
        if details.author_gate { palette.paint("on", ansi::YELLOW) } else { palette.dim("off") },
    );
    println!();
}

fn print_filters(report: &Report<'_, '_>, palette: &ansi::Palette) {
    if report.state.is_unconstrained() {
        println!("{}", palette.dim("  none"));
        return;
    }
    if let Some(query) = report.state.trimmed_query() {
        println!("  {} \"{}\"", palette.paint(format!("{:<7}", "text"), ansi::BLUE), query);
    }
    for axis in report.state.active_axes().axes() {
        let labels: Vec<String> = report
            .state
            .selected(axis)
            .iter()
            .map(|id| display_label(report.store, axis, id, report.language))
            .collect();
        let mode = match report.state.match_mode(axis) {
            MatchMode::All if axis.is_multi_valued() => palette.dim(" (all)"),
            _ => String::new(),
        };
        println!("  {} {}{}", palette.paint(format!("{:<7}", axis.to_string()), ansi::BLUE), labels.join(", "), mode);
    }
}

fn print_rail(report: &Report<'_, '_>, palette: &ansi::Palette) {
    for (axis, options) in report.result.facets.iter() {
        let chips: Vec<String> = options
            .iter()
            .map(|o| {
                if report.state.is_selected(axis, &o.id) {
                    palette.bold(palette.paint(&o.label, ansi::GREEN))
                } else {
                    o.label.clone()
                }
            })
            .collect();
        let line = if chips.is_empty() { palette.dim("-") } else { chips.join(palette.dim(" · ").as_str()) };
        println!("  {} {}", palette.paint(format!("{:<7}", axis.param_name()), ansi::BLUE), line);
    }
}

fn print_results(report: &Report<'_, '_>, palette: &ansi::Palette) {
    let page = report.page;
    println!(
        "  {}",
        palette.dim(format!("page {}/{}  │  {} excerpts", page.number, page.count.max(1), page.total))
    );
    for record in page.items {
        println!("  {} {}", palette.paint(format!("[{}]", record.id), ansi::GRAY), truncate(&record.text, EXCERPT_MAX));
        let chips: Vec<String> = sentence_tags(report.store, record, report.state, report.language)
            .into_iter()
            .map(|tag| if tag.matched { palette.paint(tag.label, ansi::GREEN) } else { palette.dim(tag.label) })
            .collect();
        if !chips.is_empty() {
            println!("      {}", chips.join(" "));
        }
        if let Some(chapter) = &record.chapter {
            println!("      {} {}", palette.dim("chapter:"), palette.paint(chapter, ansi::YELLOW));
        }
    }
}
