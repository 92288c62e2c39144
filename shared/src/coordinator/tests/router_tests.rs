use super::super::*;
use super::{settings_label, started, two_displays};
use crate::command::{ForwardChannel, CHANGE_OVERLAY_OPACITY};
use crate::display::Display;
use serde_json::json;
use std::sync::mpsc;

fn invoke(c: &mut Coordinator<super::FakeHost>, command: Command) -> Result<Reply, Error> {
    let (tx, rx) = mpsc::channel();
    c.handle(AppEvent::Invoke {
        command,
        reply: Some(tx),
    });
    rx.try_recv().expect("reply sent before handle returns")
}

#[test]
fn forward_commands_reach_every_overlay_in_order_then_settings() {
    for channel in ForwardChannel::ALL {
        let mut c = started(two_displays());
        let payload = json!({ "value": 3, "channel": channel.as_str() });
        let reply = invoke(
            &mut c,
            Command::Forward {
                channel,
                payload: payload.clone(),
            },
        )
        .unwrap();
        assert_eq!(reply, Reply::Done);

        let targets: Vec<&str> = c
            .host()
            .sent
            .iter()
            .map(|(label, ch, value)| {
                assert_eq!(ch, channel.as_str());
                assert_eq!(value, &payload);
                label.as_str()
            })
            .collect();
        assert_eq!(targets, ["overlay-0", "overlay-1", "settings"]);
    }
}

#[test]
fn forward_without_settings_window_reaches_only_overlays() {
    let mut c = started(two_displays());
    c.on_window_destroyed(&settings_label());

    c.dispatch(Command::Forward {
        channel: ForwardChannel::Pause,
        payload: json!(true),
    })
    .unwrap();
    assert_eq!(c.host().sent.len(), 2);
}

#[test]
fn one_deaf_overlay_does_not_stop_the_broadcast() {
    let mut c = started(vec![
        Display::new("A", 0, 0, 800, 600),
        Display::new("B", 800, 0, 800, 600),
        Display::new("C", 1600, 0, 800, 600),
    ]);
    c.host.fail_send.insert("overlay-1".into());

    let delivered = c.broadcast(
        "change-interval",
        &json!(5),
        router::Audience::OverlaysAndSettings,
    );
    assert_eq!(delivered, 3);
    let targets: Vec<&str> = c.host().sent.iter().map(|(l, _, _)| l.as_str()).collect();
    assert_eq!(targets, ["overlay-0", "overlay-2", "settings"]);
}

#[test]
fn opacity_is_cached_and_sent_to_overlays_only() {
    let mut c = started(two_displays());
    invoke(&mut c, Command::ChangeOpacity(50.0)).unwrap();

    assert_eq!(c.current_opacity(), 50.0);
    for overlay in c.overlays() {
        assert_eq!(
            c.host().received(&overlay.label, CHANGE_OVERLAY_OPACITY),
            [json!(50.0)]
        );
    }
    assert!(c
        .host()
        .received(&settings_label(), CHANGE_OVERLAY_OPACITY)
        .is_empty());
}

#[test]
fn get_current_opacity_returns_last_value_set() {
    let mut c = started(two_displays());
    assert_eq!(
        invoke(&mut c, Command::GetCurrentOpacity).unwrap(),
        Reply::Opacity(8.0)
    );

    for v in [0.0, 12.5, 100.0, 42.0] {
        invoke(&mut c, Command::ChangeOpacity(v)).unwrap();
        assert_eq!(
            invoke(&mut c, Command::GetCurrentOpacity).unwrap(),
            Reply::Opacity(v)
        );
    }
}

#[test]
fn late_overlay_reads_opacity_set_before_it_existed() {
    let mut c = started(two_displays());
    invoke(&mut c, Command::ChangeOpacity(50.0)).unwrap();

    let third = c
        .create_overlay(&Display::new("LATE", 4480, 0, 1920, 1080))
        .unwrap();
    assert_eq!(c.overlays().len(), 3);
    assert!(c.host().received(&third, CHANGE_OVERLAY_OPACITY).is_empty());
    assert_eq!(
        invoke(&mut c, Command::GetCurrentOpacity).unwrap(),
        Reply::Opacity(50.0)
    );
}

#[test]
fn last_opacity_write_wins() {
    let mut c = started(two_displays());
    c.dispatch(Command::ChangeOpacity(10.0)).unwrap();
    c.dispatch(Command::ChangeOpacity(20.0)).unwrap();
    assert_eq!(c.current_opacity(), 20.0);
}

#[test]
fn close_app_quits() {
    let mut c = started(two_displays());
    invoke(&mut c, Command::CloseApp).unwrap();
    assert!(c.is_quitting());
    assert_eq!(c.host().quit_calls, 1);
}

#[test]
fn show_settings_window_command_shows_and_focuses() {
    let mut c = started(two_displays());
    invoke(&mut c, Command::ShowSettingsWindow).unwrap();
    let w = c.host().window(&settings_label()).unwrap();
    assert!(w.visible && w.focused);
}

#[test]
fn minimize_command_minimizes_settings() {
    let mut c = started(two_displays());
    invoke(&mut c, Command::MinimizeSettingsWindow).unwrap();
    assert!(c.host().window(&settings_label()).unwrap().minimized);
}

#[test]
fn keybind_commands_open_and_close_the_dialog() {
    let mut c = started(two_displays());
    invoke(&mut c, Command::OpenKeybindDialog).unwrap();
    invoke(&mut c, Command::OpenKeybindDialog).unwrap();
    assert!(c.keybind_dialog().is_some());
    invoke(&mut c, Command::CloseKeybindDialog).unwrap();
    assert!(c.keybind_dialog().is_none());
}

#[test]
fn log_command_sends_nothing() {
    let mut c = started(two_displays());
    let reply = invoke(&mut c, Command::Log(json!({ "hello": "world" }))).unwrap();
    assert_eq!(reply, Reply::Done);
    assert!(c.host().sent.is_empty());
}

#[test]
fn invoke_without_reply_channel_still_runs() {
    let mut c = started(two_displays());
    c.handle(AppEvent::Invoke {
        command: Command::ChangeOpacity(33.0),
        reply: None,
    });
    assert_eq!(c.current_opacity(), 33.0);
}

#[test]
fn reply_to_a_dropped_receiver_is_ignored() {
    let mut c = started(two_displays());
    let (tx, rx) = mpsc::channel();
    drop(rx);
    c.handle(AppEvent::Invoke {
        command: Command::GetCurrentOpacity,
        reply: Some(tx),
    });
}
