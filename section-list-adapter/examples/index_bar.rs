// Example: a windowed section list with a pinned header and an index sidebar.
//
// Drives `VirtualizedEngine` the way a UI adapter would: viewport, scroll events, frame ticks.
use section_list::{
    BasicSection, FlatListEngine, RowInfo, SectionIndexOptions, SectionList, SectionListOptions,
};
use section_list_adapter::{ActiveSection, Easing, EngineOptions, IndexBar, VirtualizedEngine};

type Letters = BasicSection<String>;

fn main() {
    let sections: Vec<Letters> = ('A'..='Z')
        .map(|c| {
            let rows = (1..=8).map(|i| format!("{c}{i}")).collect();
            BasicSection::new(c.to_string(), rows)
        })
        .collect();

    let active = ActiveSection::new();
    let mut index = SectionIndexOptions::new(|s: &Letters| Some(s.title.clone()));
    index.on_section_change = Some(active.callback());

    let options = SectionListOptions::new(|info: RowInfo<'_, Letters>| Some(info.item.clone()))
        .with_render_section_header(Some(|s: &Letters| Some(format!("[{}]", s.title))))
        .with_section_index_options(Some(index));
    let list = SectionList::new(options);
    let pass = list.render(&sections);

    let mut engine = VirtualizedEngine::new(
        EngineOptions::new(|_| 1)
            .with_overscan(2)
            .with_scroll_animation(200, Easing::EaseOutCubic),
    );
    engine.set_viewport_size(6);
    engine.render(&pass);

    let mut bar = IndexBar::new(&pass, active.clone());
    println!("labels={}", bar.labels().join(""));

    // The user scrolls into the middle of "C".
    engine.on_scroll(22, 0);
    print_frame(&mut engine, &pass, &bar);

    // Dragging along a 260px sidebar jumps without animation.
    for y in [90.0, 95.0, 130.0] {
        let section = bar.drag(&mut engine, y, 260.0);
        println!("drag y={y} -> section={section:?} offset={}", engine.scroll_offset());
    }
    bar.release();
    print_frame(&mut engine, &pass, &bar);

    // Tapping a label animates; the adapter ticks once per frame.
    bar.press(&mut engine, 0);
    let mut now_ms = 0;
    while engine.is_animating() {
        now_ms += 16;
        if let Some(offset) = engine.tick(now_ms) {
            println!("t={now_ms}ms offset={offset}");
        }
    }
    print_frame(&mut engine, &pass, &bar);
}

fn print_frame<D>(engine: &mut VirtualizedEngine, pass: &D, bar: &IndexBar)
where
    D: section_list::FlatDataSource<Node = section_list::Cell<String>>,
{
    let cells = engine.render(pass);
    println!(
        "offset={} highlighted={:?}",
        engine.scroll_offset(),
        bar.snapshot().highlighted
    );
    for cell in cells {
        let text = cell.node.content.child.unwrap_or_default();
        let pin = if cell.sticky { "*" } else { " " };
        println!("  {pin}{:>4} {:<8} {}", cell.start, cell.key, text);
    }
}
