use plotters::prelude::*;

/// Index of the first maximum, scanning left to right. Keeping the first
/// occurrence is the tie-break rule every solver relies on.
pub fn argmax<T: PartialOrd>(values: &[T]) -> usize {
    let mut best: usize = 0;
    for (i, value) in values.iter().enumerate() {
        if *value > values[best] {
            best = i;
        }
    }
    best
}

pub fn max(values: &[f64]) -> f64 {
    values.iter().fold(f64::NEG_INFINITY, |acc, &value| acc.max(value))
}

/// Mean of consecutive chunks of `window` values, used to smooth the
/// per-episode reward curves before plotting.
pub fn moving_average(window: usize, values: &[f64]) -> Vec<f64> {
    let window = window.max(1);
    let mut result: Vec<f64> = Vec::with_capacity(values.len() / window + 1);
    let mut start: usize = 0;
    while start < values.len() {
        let end: usize = (start + window).min(values.len());
        let sum: f64 = values[start..end].iter().sum();
        result.push(sum / (end - start) as f64);
        start = end;
    }
    result
}

/// Draws one line per curve into `<title>.png`, lowercased with underscores.
pub fn plot_moving_average(
    results: &[Vec<f64>],
    colors: &[&'static RGBColor],
    legends: &[String],
    title: &str,
) {
    let n_points: usize = results.iter().map(|curve| curve.len()).max().unwrap_or(0);
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for curve in results {
        for &value in curve {
            y_min = y_min.min(value);
            y_max = y_max.max(value);
        }
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        return;
    }
    if y_min == y_max {
        y_min -= 1.0;
        y_max += 1.0;
    }

    let path: String = format!("{}.png", title.to_lowercase().replace(' ', "_"));
    let root = BitMapBackend::new(&path, (1080, 720)).into_drawing_area();
    root.fill(&WHITE).unwrap();

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 40))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..n_points as f64, y_min..y_max)
        .unwrap();
    chart.configure_mesh().draw().unwrap();

    for (i, curve) in results.iter().enumerate() {
        let color: &'static RGBColor = colors[i % colors.len()];
        chart
            .draw_series(LineSeries::new(
                curve.iter().enumerate().map(|(x, &y)| (x as f64, y)),
                color,
            ))
            .unwrap()
            .label(legends[i].as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }
    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .unwrap();
    root.present().unwrap();
}
