// Radial glow texture, generated on the CPU and uploaded once per stage.

/// Colour stop: offset in `[0, 1]` and straight (non-premultiplied) RGBA.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub rgba: [f32; 4],
}

pub const GLOW_STOPS: [GradientStop; 3] = [
    GradientStop {
        offset: 0.0,
        rgba: [255.0, 255.0, 200.0, 1.0],
    },
    GradientStop {
        offset: 0.2,
        rgba: [255.0, 230.0, 140.0, 0.6],
    },
    GradientStop {
        offset: 1.0,
        rgba: [255.0, 200.0, 80.0, 0.0],
    },
];

pub const GLOW_INNER_RADIUS: f32 = 10.0;

/// Colour of the gradient at `t`, clamped to the first/last stop.
pub fn sample_stops(stops: &[GradientStop], t: f32) -> [f32; 4] {
    let Some(first) = stops.first() else {
        return [0.0; 4];
    };
    if t <= first.offset {
        return first.rgba;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = (b.offset - a.offset).max(1e-6);
            let k = (t - a.offset) / span;
            let mut out = [0.0; 4];
            for (i, o) in out.iter_mut().enumerate() {
                *o = a.rgba[i] + (b.rgba[i] - a.rgba[i]) * k;
            }
            return out;
        }
    }
    stops[stops.len() - 1].rgba
}

/// Two-circle radial gradient centred in a `size`×`size` square, inner radius
/// `inner`, outer radius `size / 2`. Output is tightly packed RGBA8.
pub fn radial_glow_pixels(size: u32, inner: f32, stops: &[GradientStop]) -> Vec<u8> {
    let size = size.max(1);
    let c = size as f32 / 2.0;
    let outer = c.max(inner + 1e-3);
    let mut out = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 + 0.5 - c;
            let dy = y as f32 + 0.5 - c;
            let d = (dx * dx + dy * dy).sqrt();
            let t = ((d - inner) / (outer - inner)).clamp(0.0, 1.0);
            let [r, g, b, a] = sample_stops(stops, t);
            out.push(r.round().clamp(0.0, 255.0) as u8);
            out.push(g.round().clamp(0.0, 255.0) as u8);
            out.push(b.round().clamp(0.0, 255.0) as u8);
            out.push((a * 255.0).round().clamp(0.0, 255.0) as u8);
        }
    }
    out
}
