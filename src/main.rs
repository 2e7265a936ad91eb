// src/main.rs
use nannou::prelude::*;
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, info, warn};

use shakevis::{
    accessibility::{AccessibilityAnnouncer, AnnouncementCenter, SpeechSimulator},
    animation::{Direction, ShakePlayer, ShakeRequest, ShakeStart},
    config::Config,
    controllers::{OscCommand, OscController, OscSender},
    logging,
    services::DeferredQueue,
    views::{ShakeBox, Transform2D},
};

struct Model {
    config: Config,

    // The shaken element and its in-flight shake
    element: ShakeBox,
    player: ShakePlayer,
    shakes_finished: Rc<Cell<u32>>,

    // Accessibility
    screen_reader: Cell<bool>,
    center: Rc<AnnouncementCenter>,
    queue: Rc<DeferredQueue>,
    speech: SpeechSimulator<DeferredQueue>,
    announcer: AccessibilityAnnouncer<AnnouncementCenter, DeferredQueue>,

    // Comms components:
    osc_controller: OscController,
    osc_sender: OscSender,
}

fn main() {
    logging::init_tracing();
    nannou::app(model).update(update).run();
}

fn model(app: &App) -> Model {
    let config = Config::load().expect("Failed to load config file");

    let osc_controller =
        OscController::new(config.osc.rx_port).expect("Failed to create OSC Controller");
    let osc_sender = OscSender::new(config.osc.rx_port).expect("Failed to create OSC Sender");

    app.new_window()
        .title("shakevis")
        .size(config.window.width, config.window.height)
        .view(view)
        .key_pressed(key_pressed)
        .build()
        .expect("Failed to create window");

    let element = ShakeBox::new(
        Transform2D::IDENTITY,
        vec2(config.style.box_width, config.style.box_height),
        config.shake.pixels_per_unit,
    );

    let center = Rc::new(AnnouncementCenter::new());
    let queue = Rc::new(DeferredQueue::new());
    let speech = SpeechSimulator::new(
        Rc::clone(&center),
        Rc::clone(&queue),
        config.speech_duration(),
    );
    let announcer = AccessibilityAnnouncer::with_nudge_delay(
        Rc::clone(&center),
        Rc::clone(&queue),
        config.announcement_delay(),
    );

    info!(port = config.osc.rx_port, "listening for OSC");

    Model {
        screen_reader: Cell::new(config.accessibility.screen_reader),
        element,
        player: ShakePlayer::new(config.shake.easing),
        shakes_finished: Rc::new(Cell::new(0)),
        center,
        queue,
        speech,
        announcer,
        osc_controller,
        osc_sender,
        config,
    }
}

fn key_pressed(app: &App, model: &mut Model, key: Key) {
    match key {
        Key::H => model.osc_sender.send_shake(Direction::Horizontal),
        Key::V => model.osc_sender.send_shake(Direction::Vertical),
        Key::A => model.osc_sender.send_toggle_screen_reader(),
        Key::S => model
            .osc_sender
            .send_announce(&model.config.accessibility.message),
        Key::Q => app.quit(),
        _ => (),
    }
}

fn update(_app: &App, model: &mut Model, update: Update) {
    model.osc_controller.process_messages();
    for command in model.osc_controller.take_commands() {
        launch_command(model, command);
    }

    model.queue.advance(update.since_last);
    model.speech.update();

    model
        .player
        .update(update.since_last.as_secs_f32(), &model.element);
}

fn launch_command(model: &mut Model, command: OscCommand) {
    match command {
        OscCommand::Shake {
            direction,
            number_of_times,
            total_duration,
        } => start_shake(model, direction, number_of_times, total_duration),
        OscCommand::Announce { text } => {
            model.announcer.announce(&text);
        }
        OscCommand::SetScreenReader { enabled } => set_screen_reader(model, enabled),
        OscCommand::ToggleScreenReader => {
            let enabled = !model.screen_reader.get();
            set_screen_reader(model, enabled);
        }
    }
}

fn set_screen_reader(model: &mut Model, enabled: bool) {
    info!(enabled, "screen reader mode");
    model.screen_reader.set(enabled);
}

fn start_shake(
    model: &mut Model,
    direction: Direction,
    number_of_times: Option<u32>,
    total_duration: Option<f32>,
) {
    let finished = Rc::clone(&model.shakes_finished);
    let request = ShakeRequest::builder(direction)
        .number_of_times(number_of_times.unwrap_or(model.config.shake.number_of_times))
        .total_duration(total_duration.unwrap_or(model.config.shake.total_duration))
        .on_complete(move || finished.set(finished.get() + 1))
        .build();
    let request = match request {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "rejected shake request");
            return;
        }
    };

    match model.player.start(request, &model.screen_reader) {
        ShakeStart::Started => {}
        ShakeStart::Skipped => {
            model
                .announcer
                .announce(&model.config.accessibility.skip_announcement);
        }
        ShakeStart::Busy => debug!(?direction, "shake dropped, element still shaking"),
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let (r, g, b) = model.config.style.background_color;
    draw.background().color(rgb(r, g, b));

    let (r, g, b) = model.config.style.box_color;
    model.element.draw(&draw, rgb(r, g, b));

    let window = app.window_rect();
    let status = format!(
        "H/V shake  A screen reader: {}  S announce  Q quit    shakes: {}",
        if model.screen_reader.get() { "on" } else { "off" },
        model.shakes_finished.get(),
    );
    draw.text(&status)
        .x_y(0.0, window.bottom() + 20.0)
        .w(window.w())
        .color(WHITE);

    if let Some(text) = model.center.current() {
        draw.text(&format!("speaking: \"{}\"", text))
            .x_y(0.0, window.top() - 20.0)
            .w(window.w())
            .color(GRAY);
    }

    draw.to_frame(app, &frame).unwrap();
}
