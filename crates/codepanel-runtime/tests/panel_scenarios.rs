//! End-to-end reveal and panel flows driven with synthetic time.

use std::time::Duration;

use codepanel_runtime::{
    CodePanel, PanelEvent, PanelMsg, Phase, PrimaryAction, Speed, Tab, TokenClass, TypingConfig,
    TypingHighlighter,
};
use web_time::Instant;

const MS: Duration = Duration::from_millis(1);

fn classes_and_text(hl: &TypingHighlighter) -> Vec<(TokenClass, String)> {
    hl.render()
        .iter()
        .flat_map(|line| line.segments())
        .map(|segment| (segment.class, segment.text.to_owned()))
        .collect()
}

#[test]
fn number_and_comment_on_one_line() {
    let mut hl = TypingHighlighter::start("x = 1  # set x\n", 30 * MS).unwrap();
    hl.skip();

    let lines = hl.render();
    assert_eq!(lines.len(), 1);
    let tokens: Vec<_> = lines[0]
        .tokens
        .iter()
        .map(|t| (t.class, t.text(lines[0].text)))
        .collect();
    assert_eq!(
        tokens,
        vec![(TokenClass::Number, "1"), (TokenClass::Comment, "# set x")]
    );

    assert_eq!(
        classes_and_text(&hl),
        vec![
            (TokenClass::Plain, "x = ".to_owned()),
            (TokenClass::Number, "1".to_owned()),
            (TokenClass::Plain, "  ".to_owned()),
            (TokenClass::Comment, "# set x".to_owned()),
        ]
    );
}

#[test]
fn call_and_string() {
    let mut hl = TypingHighlighter::start("print(\"hi\")", 30 * MS).unwrap();
    hl.skip();
    assert_eq!(
        classes_and_text(&hl),
        vec![
            (TokenClass::Call, "print".to_owned()),
            (TokenClass::Plain, "(".to_owned()),
            (TokenClass::String, "\"hi\"".to_owned()),
            (TokenClass::Plain, ")".to_owned()),
        ]
    );
}

#[test]
fn speed_change_halves_next_delay() {
    let t0 = Instant::now();
    let mut hl = TypingHighlighter::start_at("abcdef", 100 * MS, t0).unwrap();

    let first = hl.pending_tick().unwrap();
    assert_eq!(first.delay, 100 * MS);
    assert!(hl.fire_at(first.token, first.deadline));
    assert_eq!(hl.state().revealed(), 1);

    // Already armed at 1x.
    assert_eq!(hl.pending_tick().unwrap().delay, 100 * MS);
    hl.cycle_speed();
    assert_eq!(hl.next_delay(), 50 * MS);

    let second = hl.pending_tick().unwrap();
    assert!(hl.fire_at(second.token, second.deadline));
    let third = hl.pending_tick().unwrap();
    assert_eq!(third.delay, 50 * MS);
    assert_eq!(third.deadline, second.deadline + 50 * MS);
}

#[test]
fn skip_mid_reveal_neutralizes_late_tick() {
    let t0 = Instant::now();
    let mut hl = TypingHighlighter::start_at("0123456789", 10 * MS, t0).unwrap();
    assert_eq!(hl.poll(t0 + 30 * MS), 3);
    let late = hl.pending_tick().unwrap();

    assert!(hl.skip());
    assert_eq!(hl.state().revealed(), 10);
    assert!(!hl.running());
    assert!(hl.pending_tick().is_none());

    assert!(!hl.fire_at(late.token, t0 + Duration::from_secs(5)));
    assert_eq!(hl.poll(t0 + Duration::from_secs(5)), 0);
    assert_eq!(hl.state().revealed(), 10);
}

#[test]
fn two_panels_tick_independently() {
    let t0 = Instant::now();
    let mut fast = TypingHighlighter::start_at("aaaa", 10 * MS, t0).unwrap();
    let mut slow = TypingHighlighter::start_at("bbbb", 40 * MS, t0).unwrap();
    let slow_tick = slow.pending_tick().unwrap();

    fast.skip();
    assert_eq!(slow.pending_tick(), Some(slow_tick));
    assert_eq!(slow.poll(t0 + 40 * MS), 1);
    assert_eq!(fast.poll(t0 + 40 * MS), 0);
}

#[test]
fn multiline_reveal_renders_partial_last_line() {
    let t0 = Instant::now();
    let source = "def f():\n    return 42\n";
    let mut hl = TypingHighlighter::start_at(source, MS, t0).unwrap();
    hl.poll(t0 + 13 * MS); // "def f():\n    "
    let lines = hl.render();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].text, "def f():");
    assert_eq!(lines[1].text, "    ");
    assert_eq!(lines[1].number, 2);

    hl.skip();
    let lines = hl.render();
    assert_eq!(lines.len(), 2);
    let classes: Vec<_> = lines[1].tokens.iter().map(|t| t.class).collect();
    assert_eq!(classes, vec![TokenClass::Keyword, TokenClass::Number]);
}

#[test]
fn panel_full_lifecycle() {
    let t0 = Instant::now();
    let config = TypingConfig::default();
    let mut panel = CodePanel::new_at("print(1)\n", ["1"], &config, t0).unwrap();

    assert_eq!(panel.phase(), Phase::Typing);
    assert_eq!(panel.time_until_tick(t0), Some(530 * MS));
    assert_eq!(panel.poll(t0 + 529 * MS), None);
    assert!(panel.highlighter().revealed_text().is_empty());
    assert_eq!(panel.poll(t0 + 530 * MS), None);
    assert_eq!(panel.highlighter().revealed_text(), "p");

    assert_eq!(
        panel.update_at(PanelMsg::CycleSpeed, t0 + 540 * MS),
        Some(PanelEvent::SpeedChanged(Speed::new(2).unwrap()))
    );
    assert_eq!(
        panel.poll(t0 + Duration::from_secs(1)),
        Some(PanelEvent::RevealCompleted)
    );
    assert_eq!(panel.phase(), Phase::Ready);
    assert_eq!(panel.primary_action(), PrimaryAction::Run);
    assert_eq!(panel.select_tab(Tab::Output), None);

    assert_eq!(panel.update(PanelMsg::Primary), Some(PanelEvent::Executed));
    assert_eq!(panel.phase(), Phase::Executed);
    assert_eq!(panel.tab(), Tab::Output);
    assert_eq!(panel.output().as_str(), "1");
    assert_eq!(panel.file_label(), "python.out");
}

#[test]
fn panel_run_during_typing() {
    let t0 = Instant::now();
    let config = TypingConfig::with_interval(30 * MS);
    let mut panel = CodePanel::new_at("x = 1", "", &config, t0).unwrap();
    panel.poll(t0 + 60 * MS);
    assert_eq!(panel.highlighter().revealed_text(), "x ");

    assert_eq!(panel.update_at(PanelMsg::Run, t0 + 61 * MS), Some(PanelEvent::Executed));
    assert_eq!(panel.highlighter().revealed_text(), "x = 1");
    assert!(!panel.show_caret());
    assert_eq!(panel.poll(t0 + Duration::from_secs(1)), None);
}
