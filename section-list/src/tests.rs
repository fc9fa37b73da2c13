use crate::*;

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use alloc::{format, vec};
use std::sync::Mutex;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        debug_assert!(start < end_exclusive);
        start + (self.next_u64() % (end_exclusive - start) as u64) as usize
    }
}

fn random_sections(rng: &mut Lcg) -> Vec<BasicSection<u32>> {
    let n = rng.gen_range_usize(0, 12);
    (0..n)
        .map(|s| {
            let k = rng.gen_range_usize(0, 6);
            BasicSection::new(
                format!("S{s}"),
                (0..k).map(|r| (s * 100 + r) as u32).collect(),
            )
        })
        .collect()
}

fn contacts() -> Vec<BasicSection<&'static str>> {
    vec![
        BasicSection::new("A", vec!["Ada", "Alan"]),
        BasicSection::new("B", vec!["Barbara", "Brian"]),
        BasicSection::new("C", vec!["Charles", "Claude"]),
        BasicSection::new("D", vec![]),
    ]
}

fn title<T>(s: &BasicSection<T>) -> Option<String> {
    Some(s.title.clone())
}

/// A flat engine that lays every entry out at `start = index`, `size = 1` and records requests.
#[derive(Debug, Default)]
struct RecordingEngine {
    scrolls: Vec<(usize, bool)>,
    viewable: Vec<ViewToken>,
}

impl FlatListEngine for RecordingEngine {
    fn render<D: FlatDataSource + ?Sized>(&mut self, source: &D) -> Vec<RenderedCell<D::Node>> {
        let columns = source.num_columns();
        let sticky = source.sticky_header_indices();
        let mut out = Vec::new();
        for index in 0..source.len() {
            let mut layout = ItemLayout::default();
            source.override_item_layout(&mut layout, index, columns);
            let (Some(node), Some(item_type), Some(key)) = (
                source.render_item(index),
                source.item_type(index),
                source.key(index),
            ) else {
                continue;
            };
            out.push(RenderedCell {
                index,
                item_type,
                key,
                start: index as u64,
                size: 1,
                column: 0,
                span: layout.span,
                sticky: sticky.contains(&index),
                node,
            });
        }
        source.on_viewable_items_changed(&self.viewable);
        out
    }

    fn scroll_to_index(&mut self, index: usize, animated: bool) {
        self.scrolls.push((index, animated));
    }
}

fn viewable(indexes: &[usize]) -> Vec<ViewToken> {
    indexes
        .iter()
        .map(|&index| ViewToken {
            index,
            is_viewable: true,
        })
        .collect()
}

fn text_options() -> SectionListOptions<BasicSection<&'static str>, String> {
    SectionListOptions::new(|info: RowInfo<'_, BasicSection<&'static str>>| {
        Some(info.item.to_string())
    })
    .with_render_section_header(Some(|s: &BasicSection<&'static str>| {
        Some(format!("[{}]", s.title))
    }))
    .with_section_index_options(Some(SectionIndexOptions::new(title)))
}

#[test]
fn flat_length_is_sections_plus_rows() {
    let mut rng = Lcg::new(7);
    for _ in 0..200 {
        let sections = random_sections(&mut rng);
        let flat = flatten(&sections, title);

        let rows: usize = sections.iter().map(|s| s.data.len()).sum();
        assert_eq!(flat.len(), sections.len() + rows);

        let headers: Vec<usize> = flat
            .entries()
            .iter()
            .filter_map(|e| e.header().map(|_| e.section_index()))
            .collect();
        assert_eq!(headers, (0..sections.len()).collect::<Vec<_>>());
    }
}

#[test]
fn index_table_points_at_matching_headers() {
    let mut rng = Lcg::new(42);
    for _ in 0..200 {
        let sections = random_sections(&mut rng);
        let flat = flatten(&sections, title);
        let table = flat.section_index();
        assert_eq!(table.len(), sections.len());

        for w in table.windows(2) {
            assert!(w[0].flat_index < w[1].flat_index);
        }
        for (i, e) in table.iter().enumerate() {
            match flat.get(e.flat_index) {
                Some(FlatEntry::Header {
                    section,
                    section_index,
                }) => {
                    assert_eq!(section_index, i);
                    assert!(core::ptr::eq(section, &sections[i]));
                    assert_eq!(e.label, sections[i].title);
                }
                other => panic!("expected header for section {i}, got {other:?}"),
            }
        }
    }
}

#[test]
fn rows_keep_caller_order() {
    let sections = contacts();
    let flat = flatten(&sections, title);
    let rows: Vec<&str> = flat.entries().iter().filter_map(|e| e.row().copied()).collect();
    assert_eq!(
        rows,
        ["Ada", "Alan", "Barbara", "Brian", "Charles", "Claude"]
    );
}

#[test]
fn empty_section_still_gets_header() {
    let sections = vec![
        BasicSection::new("A", vec![1u32]),
        BasicSection::new("B", vec![]),
        BasicSection::new("C", vec![2]),
    ];
    let flat = flatten(&sections, title);
    assert_eq!(flat.len(), 5);
    let indexes: Vec<usize> = flat.section_index().iter().map(|e| e.flat_index).collect();
    assert_eq!(indexes, [0, 2, 3]);
    assert!(flat.get(2).is_some_and(|e| e.is_header()));
}

#[test]
fn zero_sections_yield_empty_but_valid_sequence() {
    let sections: Vec<BasicSection<u32>> = Vec::new();
    let list = SectionList::new(SectionListOptions::new(|_: RowInfo<'_, BasicSection<u32>>| {
        Some(())
    }));
    let pass = list.render(&sections);
    assert!(pass.flat().is_empty());
    assert!(pass.section_index().is_empty());
    assert!(pass.sticky_header_indices().is_empty());

    let mut engine = RecordingEngine::default();
    assert!(engine.render(&pass).is_empty());
    assert!(!pass.handle(&mut engine).scroll_to_section(0));
    assert!(engine.scrolls.is_empty());
}

#[test]
fn missing_or_duplicate_labels_are_kept_as_is() {
    let sections = vec![
        BasicSection::new("A", vec![1u32]),
        BasicSection::new("A", vec![2]),
        BasicSection::new("", vec![3]),
    ];
    let flat = flatten(&sections, |s| (!s.title.is_empty()).then(|| s.title.clone()));
    let labels: Vec<&str> = flat.section_index().iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, ["A", "A", ""]);

    // Without index options every label is empty.
    let list = SectionList::new(SectionListOptions::new(|_: RowInfo<'_, BasicSection<u32>>| {
        Some(())
    }));
    let pass = list.render(&sections);
    assert!(pass.section_index().iter().all(|e| e.label.is_empty()));
}

#[test]
fn flattening_is_idempotent() {
    let mut rng = Lcg::new(99);
    for _ in 0..50 {
        let sections = random_sections(&mut rng);
        let a = flatten(&sections, title);
        let b = flatten(&sections, title);
        assert_eq!(a.entries(), b.entries());
        assert_eq!(a.section_index(), b.section_index());
    }
}

#[test]
fn scroll_to_section_targets_header_once() {
    let sections = contacts();
    let list = SectionList::new(text_options());
    let pass = list.render(&sections);

    let mut engine = RecordingEngine::default();
    for (i, e) in pass.section_index().iter().enumerate() {
        engine.scrolls.clear();
        assert!(pass.handle(&mut engine).scroll_to_section(i));
        assert_eq!(engine.scrolls, [(e.flat_index, true)]);
    }

    engine.scrolls.clear();
    assert!(pass.handle(&mut engine).scroll_to_section_with(2, false));
    assert_eq!(engine.scrolls, [(6, false)]);
}

#[test]
fn scroll_to_missing_section_is_a_no_op() {
    let sections = contacts();
    let list = SectionList::new(text_options());
    let pass = list.render(&sections);

    let mut engine = RecordingEngine::default();
    let mut handle = pass.handle(&mut engine);
    assert!(!handle.scroll_to_section(4));
    assert!(!handle.scroll_to_section(usize::MAX));
    assert!(engine.scrolls.is_empty());
}

#[test]
fn handle_delegates_engine_operations() {
    let sections = contacts();
    let list = SectionList::new(text_options());
    let pass = list.render(&sections);

    let mut engine = RecordingEngine::default();
    let mut handle = pass.handle(&mut engine);
    handle.scroll_to_index(5, false);
    assert_eq!(handle.engine().scrolls, [(5, false)]);
    let cells = handle.render(&pass);
    assert_eq!(cells.len(), pass.flat().len());
    handle.engine_mut().scrolls.clear();
    assert!(engine.scrolls.is_empty());
}

#[test]
fn stale_controller_keeps_targeting_its_own_table() {
    let before = contacts();
    let mut after = contacts();
    after.insert(0, BasicSection::new("0", vec!["Zero", "One", "Two"]));

    let list = SectionList::new(text_options());
    let stale = list.render(&before).scroll_controller();
    let fresh = list.render(&after).scroll_controller();

    assert_eq!(stale.target(1), Some(3));
    assert_eq!(fresh.target(1), Some(4));
    assert_eq!(stale.section_count(), 4);
    assert_eq!(fresh.section_count(), 5);
}

#[test]
fn sticky_indices_follow_the_flag() {
    let mut rng = Lcg::new(3);
    for _ in 0..50 {
        let sections = random_sections(&mut rng);
        let flat = flatten(&sections, title);
        let headers: Vec<usize> = flat
            .entries()
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_header())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(sticky_header_indices(&flat, true), headers);
        assert!(sticky_header_indices(&flat, false).is_empty());
    }

    let sections = contacts();
    let list = SectionList::new(text_options());
    assert_eq!(list.render(&sections).sticky_header_indices(), [0, 3, 6, 9]);
    let list = SectionList::new(text_options().with_sticky_section_headers_enabled(false));
    assert!(list.render(&sections).sticky_header_indices().is_empty());
}

#[test]
fn headers_span_every_column() {
    let sections = contacts();
    for columns in [1usize, 2, 3] {
        let list = SectionList::new(text_options().with_num_columns(columns));
        let pass = list.render(&sections);
        for (i, e) in pass.flat().entries().iter().enumerate() {
            let layout = pass.item_layout(i, columns).unwrap();
            match e {
                FlatEntry::Header { .. } => assert_eq!(layout.span, columns),
                FlatEntry::Row { .. } => assert_eq!(layout.span, 1),
            }
        }
        assert_eq!(pass.item_layout(pass.flat().len(), columns), None);
    }
}

#[test]
fn caller_layout_override_runs_before_span_policy() {
    let sections = contacts();
    let options = text_options().with_num_columns(3).with_override_item_layout(Some(
        |layout: &mut ItemLayout, entry: &FlatEntry<'_, BasicSection<&'static str>>, _, _| {
            layout.span = 2;
            layout.size = Some(if entry.is_header() { 24 } else { 48 });
        },
    ));
    let list = SectionList::new(options);
    let pass = list.render(&sections);

    assert_eq!(
        pass.item_layout(0, 3),
        Some(ItemLayout {
            span: 3,
            size: Some(24)
        })
    );
    assert_eq!(
        pass.item_layout(1, 3),
        Some(ItemLayout {
            span: 1,
            size: Some(48)
        })
    );
}

#[test]
fn content_axes_follow_orientation() {
    assert_eq!(header_content_axis(false), Axis::Horizontal);
    assert_eq!(header_content_axis(true), Axis::Vertical);
    assert_eq!(row_content_axis(false, 1), Axis::Vertical);
    assert_eq!(row_content_axis(false, 3), Axis::Horizontal);
    assert_eq!(row_content_axis(true, 3), Axis::Vertical);

    let sections = contacts();
    let list = SectionList::new(text_options().with_num_columns(2));
    let pass = list.render(&sections);
    assert_eq!(pass.render_cell(0).unwrap().content.axis, Axis::Horizontal);
    assert_eq!(pass.render_cell(1).unwrap().content.axis, Axis::Horizontal);
}

fn separator_sections() -> Vec<BasicSection<&'static str>> {
    vec![
        BasicSection::new("A", vec!["a1", "a2"]),
        BasicSection::new("B", vec![]),
    ]
}

fn separator_options() -> SectionListOptions<BasicSection<&'static str>, String> {
    text_options()
        .with_item_separator(Some(|p: SeparatorProps<'_, BasicSection<&'static str>>| {
            Some(format!("item-sep@{}", p.index))
        }))
        .with_section_separator(Some(|p: SeparatorProps<'_, BasicSection<&'static str>>| {
            Some(format!("section-sep@{}", p.index))
        }))
}

#[test]
fn separator_kind_depends_on_leading_entry() {
    let sections = separator_sections();
    let flat = flatten(&sections, title);

    let kinds: Vec<Option<SeparatorKind>> = (0..flat.len())
        .map(|i| dispatch_separator(&flat, i, false).map(|s| s.kind))
        .collect();
    assert_eq!(
        kinds,
        [
            Some(SeparatorKind::Section),
            Some(SeparatorKind::Item),
            Some(SeparatorKind::Item),
            None,
        ]
    );

    let slot = dispatch_separator(&flat, 1, false).unwrap();
    assert_eq!(slot.props.index, 1);
    assert_eq!(slot.props.leading_item.row(), Some(&"a1"));
    assert_eq!(slot.props.trailing_item.row(), Some(&"a2"));
    assert!(dispatch_separator(&flat, usize::MAX, false).is_none());
}

#[test]
fn separators_render_after_content() {
    let sections = separator_sections();
    let list = SectionList::new(separator_options());
    let pass = list.render(&sections);

    let header = pass.render_cell(0).unwrap();
    assert_eq!(header.leading_separator, None);
    assert_eq!(header.trailing_separator.as_deref(), Some("section-sep@0"));
    assert_eq!(
        pass.render_cell(1).unwrap().trailing_separator.as_deref(),
        Some("item-sep@1")
    );

    let last = pass.render_cell(3).unwrap();
    assert_eq!(last.leading_separator, None);
    assert_eq!(last.trailing_separator, None);
}

#[test]
fn inverted_lists_render_separators_before_content() {
    let sections = separator_sections();
    let list = SectionList::new(separator_options().with_inverted(true));
    let pass = list.render(&sections);

    let header = pass.render_cell(0).unwrap();
    assert_eq!(header.leading_separator.as_deref(), Some("section-sep@0"));
    assert_eq!(header.trailing_separator, None);
    assert_eq!(
        header.into_nodes().collect::<Vec<_>>(),
        ["section-sep@0", "[A]"]
    );

    let row = pass.render_cell(2).unwrap();
    assert_eq!(row.leading_separator.as_deref(), Some("item-sep@2"));
    assert_eq!(row.trailing_separator, None);

    let last = pass.render_cell(3).unwrap();
    assert_eq!(last.leading_separator, None);
}

#[test]
fn missing_renderers_render_nothing() {
    let sections = separator_sections();
    let list = SectionList::new(SectionListOptions::new(
        |info: RowInfo<'_, BasicSection<&'static str>>| Some(info.item.to_string()),
    ));
    let pass = list.render(&sections);
    for i in 0..pass.flat().len() {
        let cell = pass.render_cell(i).unwrap();
        assert_eq!(cell.leading_separator, None);
        assert_eq!(cell.trailing_separator, None);
        assert_eq!(cell.footer, None);
    }
    assert_eq!(pass.render_cell(0).unwrap().content.child, None);
    assert_eq!(pass.render_cell(1).unwrap().content.child.as_deref(), Some("a1"));
    assert!(pass.render_cell(4).is_none());
}

#[test]
fn footers_close_each_section() {
    let sections = separator_sections();
    let options = separator_options().with_render_section_footer(Some(
        |s: &BasicSection<&'static str>| Some(format!("end {}", s.title)),
    ));
    let list = SectionList::new(options);
    let pass = list.render(&sections);

    let footers: Vec<Option<String>> = (0..pass.flat().len())
        .map(|i| pass.render_cell(i).unwrap().footer)
        .collect();
    assert_eq!(
        footers,
        [None, None, Some("end A".into()), Some("end B".into())]
    );
    assert_eq!(
        pass.render_cell(2).unwrap().into_nodes().collect::<Vec<_>>(),
        ["a2", "end A", "item-sep@2"]
    );
}

#[test]
fn row_renderer_sees_its_section() {
    let sections = contacts();
    let list = SectionList::new(SectionListOptions::new(
        |info: RowInfo<'_, BasicSection<&'static str>>| {
            Some(format!(
                "{}{}:{}:{}",
                info.section.title, info.index, info.section_index, info.item
            ))
        },
    ));
    let pass = list.render(&sections);
    assert_eq!(
        pass.render_cell(5).unwrap().content.child.as_deref(),
        Some("B1:1:Brian")
    );
}

#[test]
fn keys_default_to_positions() {
    let sections = contacts();
    let list = SectionList::new(text_options());
    let pass = list.render(&sections);
    assert_eq!(pass.key_for(0).as_deref(), Some("header-0"));
    assert_eq!(pass.key_for(5).as_deref(), Some("row-1-1"));
    assert_eq!(pass.key_for(10), None);

    let list = SectionList::new(text_options().with_key_extractor(Some(
        |e: &FlatEntry<'_, BasicSection<&'static str>>, i: usize| match e {
            FlatEntry::Header { section, .. } => format!("h:{}", section.title),
            FlatEntry::Row { item, .. } => format!("r:{item}:{i}"),
        },
    )));
    let pass = list.render(&sections);
    assert_eq!(pass.key_for(3).as_deref(), Some("h:B"));
    assert_eq!(pass.key_for(4).as_deref(), Some("r:Barbara:4"));
}

fn recording_options(
    seen: Arc<Mutex<Vec<usize>>>,
) -> SectionListOptions<BasicSection<&'static str>, String> {
    text_options().with_section_index_options(Some(
        SectionIndexOptions::new(title).with_on_section_change(Some(move |i: usize| {
            seen.lock().unwrap().push(i);
        })),
    ))
}

#[test]
fn topmost_visible_header_selects_section() {
    let sections = contacts();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let list = SectionList::new(recording_options(Arc::clone(&seen)));
    let pass = list.render(&sections);
    assert_eq!(pass.section_index()[2].flat_index, 6);

    let resolved = pass
        .viewability_mapper()
        .on_viewable_items_changed(pass.flat(), &viewable(&[5, 6, 7]));
    assert_eq!(resolved, Some(2));
    assert_eq!(*seen.lock().unwrap(), [2]);
}

#[test]
fn rows_only_window_fires_nothing() {
    let sections = contacts();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let list = SectionList::new(recording_options(Arc::clone(&seen)));
    let pass = list.render(&sections);

    pass.on_viewable_items_changed(&viewable(&[4, 5]));
    pass.on_viewable_items_changed(&[]);
    pass.on_viewable_items_changed(&viewable(&[42]));
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn first_header_in_engine_order_wins() {
    let sections = contacts();
    let list = SectionList::new(text_options());
    let pass = list.render(&sections);
    let mapper = pass.viewability_mapper();

    assert_eq!(mapper.visible_section(pass.flat(), &viewable(&[7, 6, 3])), Some(2));
    assert_eq!(mapper.visible_section(pass.flat(), &viewable(&[2, 3, 4, 6])), Some(1));

    let mut tokens = viewable(&[3, 6]);
    tokens[0].is_viewable = false;
    assert_eq!(mapper.visible_section(pass.flat(), &tokens), Some(2));
}

#[test]
fn engine_render_drives_the_mapper() {
    let sections = contacts();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let list = SectionList::new(recording_options(Arc::clone(&seen)).with_num_columns(2));
    let pass = list.render(&sections);

    let mut engine = RecordingEngine {
        viewable: viewable(&[8, 9]),
        ..Default::default()
    };
    let cells = engine.render(&pass);
    assert_eq!(cells.len(), 10);
    assert!(cells[0].sticky && cells[3].sticky && !cells[1].sticky);
    assert_eq!(cells[9].item_type, ItemType::SectionHeader);
    assert_eq!(cells[9].span, 2);
    assert_eq!(cells[9].node.content.child.as_deref(), Some("[D]"));
    assert_eq!(*seen.lock().unwrap(), [3]);
}
