// What you SEE now:
// • The label image of a small animated scene, one color per label value.
// • Walls across the middle: exit, locked door, switch, exit sign, plain.
// • Actors wandering in front; the weapon bobbing at the bottom.
// • C toggles grayscale/colored palette, B toggles bounding boxes,
//   E writes labels_NNNNN.png + labels_NNNNN.json. ESC quits.

use label_buffer::config::load_config;
use label_buffer::draw::LabelViewer;
use label_buffer::export::save_png;
use label_buffer::palette::Palette;
use label_buffer::scene::Scene;
use label_buffer::{Error, FrameReport, LabelsController, SpecialTable};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    /* --- Config: optional path as the first argument --- */
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = load_config(config_path.as_deref())?;
    let resolution = (config.width, config.height);
    info!(width = config.width, height = config.height, "starting label demo");

    /* --- Session objects: labels controller, stand-in rasterizer, window --- */
    let specials = SpecialTable::standard();
    let mut labels = LabelsController::from_config(&config, &Scene::textures())?;
    let mut scene = Scene::new(config.width, config.height, config.demo.actors, config.demo.seed);
    let mut viewer = LabelViewer::new(&config.viewer.title, config.width as usize, config.height as usize)?;

    let mut colored = config.viewer.colored;
    let mut palette = Palette::new(colored);
    let mut show_boxes = config.viewer.show_boxes;

    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut last_frame_time = Instant::now();
    let mut frame: u64 = 0;

    /* ------------------------------ Main loop ------------------------------ */
    while viewer.is_open() && !viewer.esc_pressed() {
        let now = Instant::now();
        let dt = (now - last_frame_time).as_secs_f32();
        last_frame_time = now;

        /* 1) Inputs */
        if viewer.c_pressed_once() {
            colored = !colored;
            palette = Palette::new(colored);
        }
        if viewer.b_pressed_once() { show_boxes = !show_boxes; }

        /* 2) Frame boundary, then "rasterize" */
        labels.begin_frame(&resolution)?;
        scene.update(dt, resolution.0, resolution.1);
        scene.render(&mut labels, &specials);

        /* 3) Consume the frame while the buffer is locked */
        labels.buffer_mut().lock();
        if viewer.e_pressed_once() {
            let stem = config.demo.export_dir.join(format!("labels_{frame:05}"));
            save_png(labels.buffer(), &stem.with_extension("png"))?;
            FrameReport::collect(&labels).write_json(&stem.with_extension("json"))?;
        }
        let snapshot = labels.snapshot();
        viewer.present(labels.buffer(), &palette, show_boxes.then_some(snapshot.as_slice()))?;
        labels.buffer_mut().unlock();

        /* 4) FPS + label count once per second */
        frame += 1;
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            let report = FrameReport::collect(&labels);
            info!(
                fps = (fps as f64 * 10.0).round() / 10.0,
                labels = report.labels.len(),
                actors = labels.actors().len(),
                "frame stats"
            );
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}
