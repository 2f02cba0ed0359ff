//! Snapshot tests for widget rendering.
//!
//! These tests use insta to capture and verify the visual output of widgets.

use rangecard_config::{CellMetrics, RawCardConfig};
use rangecard_protocol::{LayoutTuning, MemoryStore};
use ratatui::{buffer::Buffer, layout::Rect};

use super::{card_regions, render_card};
use crate::card::SliderCard;
use crate::test_utils::buffer_to_string;
use crate::theme::Theme;

/// Creates a card showing 20 and 80 on the default 0..100 range.
fn sample_card(raw: RawCardConfig) -> SliderCard {
    let raw = raw
        .with("entity_min", "input_number.low")
        .with("entity_max", "input_number.high");
    let mut card = SliderCard::from_raw(&raw).unwrap();
    let store = MemoryStore::with_values([("input_number.low", 20.0), ("input_number.high", 80.0)]);
    card.refresh(&store);
    card
}

fn render(card: &mut SliderCard, area: Rect) -> String {
    let cell = CellMetrics::default();
    let regions = card_regions(card, &cell, area);
    card.slider_mut().set_track_area(regions.track);
    let mut buf = Buffer::empty(area);
    render_card(card, &Theme::default(), &cell, &regions, &mut buf);
    buffer_to_string(&buf)
}

#[test]
fn snapshot_horizontal_card() {
    let mut card = sample_card(RawCardConfig::new());

    insta::assert_snapshot!(render(&mut card, Rect::new(0, 0, 20, 4)), @r"
    ╭Range Slider──────╮
    │───█━━━━━━━━━━█───│
    │   20.0% - 80.0%  │
    ╰──────────────────╯
    ");
}

#[test]
fn snapshot_vertical_fixed_height_card() {
    let mut card = sample_card(
        RawCardConfig::new()
            .with("name", "Temp")
            .with("unit", "")
            .with("decimals", 0)
            .with("orientation", "vertical")
            .with("vertical_height", "64px"),
    );
    card.relayout(None, &LayoutTuning::default());

    insta::assert_snapshot!(render(&mut card, Rect::new(0, 0, 9, 7)), @r"
    ╭Temp───╮
    │   │   │
    │   ██  │
    │   ██  │
    │   │   │
    │20 - 80│
    ╰───────╯
    ");
}
