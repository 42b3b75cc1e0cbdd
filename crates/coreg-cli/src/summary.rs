use std::path::Path;

use console::Style;
use coreg_core::coreg::{GlobalCoregParams, LocalCoregParams};
use coreg_core::grid::RasterGridDescriptor;
use coreg_core::warp::WarpRequest;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!(
        "  {}",
        s.title.apply_to("\u{2550}".repeat(title.chars().count()))
    );
    println!();
}

fn print_path(s: &Styles, label: &str, path: &Path) {
    println!(
        "  {:<14}{}",
        s.label.apply_to(label),
        s.path.apply_to(path.display())
    );
}

fn print_nodata(s: &Styles, label: &str, nodata: Option<f64>) {
    match nodata {
        Some(v) => println!("    {:<14}{}", s.label.apply_to(label), s.value.apply_to(v)),
        None => println!(
            "    {:<14}{}",
            s.label.apply_to(label),
            s.disabled.apply_to("none")
        ),
    }
}

pub fn print_grid(path: &Path, grid: &RasterGridDescriptor) {
    let s = Styles::new();
    print_title(&s, "Raster Grid");
    print_path(&s, "File", path);
    println!();

    println!("  {}", s.header.apply_to("Grid"));
    println!(
        "    {:<14}{}",
        s.label.apply_to("Size"),
        s.value.apply_to(format!("{} x {} px", grid.width_px, grid.height_px))
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Origin"),
        s.value.apply_to(format!("{}, {}", grid.origin_x, grid.origin_y))
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Pixel size"),
        s.value
            .apply_to(format!("{} x {}", grid.pixel_size_x, grid.pixel_size_y))
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Extent"),
        s.value.apply_to(grid.extent())
    );
    if grid.skew != (0.0, 0.0) {
        println!(
            "    {:<14}{}",
            s.label.apply_to("Rotation"),
            s.disabled
                .apply_to(format!("{}, {} (ignored)", grid.skew.0, grid.skew.1))
        );
    }
    print_nodata(&s, "Nodata", grid.nodata_value);
    println!();

    println!("  {}", s.header.apply_to("Projection"));
    if grid.projection.is_empty() {
        println!("    {}", s.disabled.apply_to("unknown"));
    } else {
        for line in grid.projection.lines() {
            println!("    {}", line);
        }
    }
    println!();
}

pub fn print_warp_plan(request: &WarpRequest) {
    let s = Styles::new();
    print_title(&s, "Alignment Plan");
    print_path(&s, "Source", &request.source_path);
    print_path(&s, "Output", &request.destination_path);
    if let Some(ref cutline) = request.cutline_path {
        print_path(&s, "Mask", cutline);
    }
    println!();

    println!("  {}", s.header.apply_to("Warp"));
    println!(
        "    {:<14}{}",
        s.label.apply_to("Resampling"),
        s.method.apply_to(request.resample_method)
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Pixel size"),
        s.value.apply_to(format!(
            "{} x {}",
            request.target_pixel_size_x, request.target_pixel_size_y
        ))
    );
    match request.output_bounds {
        Some(bounds) => println!(
            "    {:<14}{}",
            s.label.apply_to("Bounds"),
            s.value.apply_to(bounds)
        ),
        None => println!(
            "    {:<14}{}",
            s.label.apply_to("Bounds"),
            s.disabled.apply_to("from source")
        ),
    }
    println!(
        "    {:<14}{}",
        s.label.apply_to("Format"),
        s.value
            .apply_to(request.output_format.as_deref().unwrap_or("GTiff"))
    );
    print_nodata(&s, "Src nodata", request.src_nodata);
    print_nodata(&s, "Dst nodata", request.dst_nodata);
    println!();
}

pub fn print_global_summary(reference: &Path, target: &Path, params: &GlobalCoregParams) {
    let s = Styles::new();
    print_title(&s, "Global Co-registration");
    print_path(&s, "Reference", reference);
    print_path(&s, "Target", target);
    println!();

    println!("  {}", s.header.apply_to("Matching"));
    match params.matching_window {
        Some(w) => println!(
            "    {:<14}{}",
            s.label.apply_to("Window"),
            s.value.apply_to(w)
        ),
        None => println!(
            "    {:<14}{}",
            s.label.apply_to("Window"),
            s.disabled.apply_to("whole overlap")
        ),
    }
    println!(
        "    {:<14}{}",
        s.label.apply_to("Max shift"),
        s.value.apply_to(format!("{} px", params.max_shift))
    );
    print_output_flags(&s, params.align_grids, params.match_gsd);
    println!(
        "    {:<14}{}",
        s.label.apply_to("Resampling"),
        s.method.apply_to(params.resampling)
    );
    println!();
}

pub fn print_local_summary(reference: &Path, target: &Path, params: &LocalCoregParams) {
    let s = Styles::new();
    print_title(&s, "Local Co-registration");
    print_path(&s, "Reference", reference);
    print_path(&s, "Target", target);
    println!();

    println!("  {}", s.header.apply_to("Tie points"));
    println!(
        "    {:<14}{}",
        s.label.apply_to("Grid"),
        s.value.apply_to(format!("every {} px", params.grid_res))
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Window"),
        s.value
            .apply_to(format!("{0} x {0} px", params.window_size))
    );
    println!(
        "    {:<14}{}",
        s.label.apply_to("Max shift"),
        s.value.apply_to(format!("{} px", params.max_shift))
    );
    print_output_flags(&s, params.align_grids, params.match_gsd);
    println!(
        "    {:<14}{}",
        s.label.apply_to("Resampling"),
        s.method.apply_to(params.resampling)
    );
    match params.workers {
        Some(n) => println!(
            "    {:<14}{}",
            s.label.apply_to("Workers"),
            s.value.apply_to(n)
        ),
        None => println!(
            "    {:<14}{}",
            s.label.apply_to("Workers"),
            s.disabled.apply_to("all cores")
        ),
    }
    println!();
}

fn print_output_flags(s: &Styles, align_grids: bool, match_gsd: bool) {
    let flag = |on: bool| {
        if on {
            s.method.apply_to("yes")
        } else {
            s.disabled.apply_to("no")
        }
    };
    println!(
        "    {:<14}{}",
        s.label.apply_to("Align grids"),
        flag(align_grids)
    );
    println!("    {:<14}{}", s.label.apply_to("Match GSD"), flag(match_gsd));
}
