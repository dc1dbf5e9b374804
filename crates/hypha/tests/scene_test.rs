mod common;

use common::{Call, RecordingClient};
use hypha::{Attrs, Error, GraphMirror, ProjectorConfig};

fn mirror() -> GraphMirror<&'static str, RecordingClient> {
    GraphMirror::new(RecordingClient::new()).unwrap()
}

#[test]
fn layout_types_map_to_wire_codes() {
    let mut g = mirror();
    g.set_layout_type("static").unwrap();
    g.set_layout_type("dynamic").unwrap();

    assert!(g.client().calls.contains(&Call::SetLayoutType(0)));
    assert!(g.client().calls.contains(&Call::SetLayoutType(1)));
}

#[test]
fn bogus_layout_type_is_rejected_before_the_wire() {
    let mut g = mirror();
    let err = g.set_layout_type("bogus").unwrap_err();
    assert!(matches!(err, Error::UnknownLayoutType(_)));
    assert_eq!(g.client().calls, vec![Call::Clear]);
}

#[test]
fn texture_node_modes_are_validated() {
    let mut g = mirror();
    g.set_texture_node_mode("align").unwrap();
    g.set_texture_node_mode("rotate").unwrap();
    assert!(matches!(
        g.set_texture_node_mode("spin"),
        Err(Error::UnknownTextureMode(_))
    ));

    assert!(g
        .client()
        .calls
        .contains(&Call::SetTextureNodeMode("align".into())));
    assert!(g
        .client()
        .calls
        .contains(&Call::SetTextureNodeMode("rotate".into())));
}

#[test]
fn open_file_sends_an_absolute_path() {
    let mut g = mirror();
    g.open_file("scenes/demo.xml").unwrap();

    let Some(Call::OpenFile(path)) = g
        .client()
        .calls
        .iter()
        .find(|c| matches!(c, Call::OpenFile(_)))
    else {
        panic!("no open_file call recorded");
    };
    assert!(path.is_absolute());
    assert!(path.ends_with("scenes/demo.xml"));
}

#[test]
fn scene_passthroughs_hit_the_wire_verbatim() {
    let mut g = mirror();
    g.center().unwrap();
    g.draw().unwrap();
    g.layout(true).unwrap();
    g.clear_velocities().unwrap();
    g.randomize_positions(-1.0).unwrap();
    g.start_layout().unwrap();

    let calls = &g.client().calls;
    assert!(calls.contains(&Call::Center));
    assert!(calls.contains(&Call::Draw));
    assert!(calls.contains(&Call::Layout(true)));
    assert!(calls.contains(&Call::ClearVelocities));
    assert!(calls.contains(&Call::RandomizePositions(-1.0)));
    assert!(calls.contains(&Call::StartLayout));
}

#[test]
fn custom_attribute_allow_list_is_honored() {
    let config = ProjectorConfig {
        custom_node_attrs: vec!["group".into()],
        ..Default::default()
    };
    let mut g: GraphMirror<&str, RecordingClient> =
        GraphMirror::with_config(RecordingClient::new(), config).unwrap();

    let h = g
        .add_node("a", Attrs::new().with("group", "core").with("rank", 1))
        .unwrap();

    assert!(g.client().calls.contains(&Call::SetNodeAttribute(
        h,
        "group".into(),
        "core".into()
    )));
    // "rank" is not on the allow-list.
    assert_eq!(
        g.client()
            .count(|c| matches!(c, Call::SetNodeAttribute(..))),
        1
    );
}

#[test]
fn alternate_label_attribute_is_respected() {
    let config = ProjectorConfig {
        label_attr: "name".into(),
        ..Default::default()
    };
    let mut g: GraphMirror<&str, RecordingClient> =
        GraphMirror::with_config(RecordingClient::new(), config).unwrap();

    let h = g.add_node("a", Attrs::new().with("name", "alpha")).unwrap();
    assert!(g
        .client()
        .calls
        .contains(&Call::SetNodeLabel(h, "alpha".into())));
}

#[test]
fn add_node_at_creates_at_the_given_position() {
    let mut g = mirror();
    g.add_node_at("a", [1.0, 2.0, 3.0], Attrs::new()).unwrap();
    assert!(g.client().calls.contains(&Call::AddNodeAt(1.0, 2.0, 3.0)));

    // Existing key: position is ignored, nothing new is created.
    g.add_node_at("a", [9.0, 9.0, 9.0], Attrs::new()).unwrap();
    assert_eq!(g.client().node_creations(), 1);
}
