use std::sync::Arc;

use switchyard::path::{SystemPath, SystemPathBuf};
use switchyard::{
    NullEnvironmentProvider, ProjectRegistry, StaticSettings, TestItem,
    group_test_items_by_project,
};
use switchyard_test::{MockEnvironmentProvider, StubAdapterFactory};

fn registry(provider: MockEnvironmentProvider) -> ProjectRegistry {
    ProjectRegistry::new(
        Arc::new(provider),
        Arc::new(StaticSettings::default()),
        Arc::new(StubAdapterFactory),
    )
}

#[tokio::test]
async fn discovered_nested_projects_route_to_the_most_specific_root() {
    // Same workspace described in both discovery orders; routing must not
    // care which project the provider reported first.
    let providers = [
        MockEnvironmentProvider::available()
            .with_project("parent", "/ws/parent")
            .with_project("child", "/ws/parent/child"),
        MockEnvironmentProvider::available()
            .with_project("child", "/ws/parent/child")
            .with_project("parent", "/ws/parent"),
    ];

    for provider in providers {
        let mut registry = registry(provider);
        let projects = registry
            .discover_and_register_projects(SystemPath::new("/ws"))
            .await;
        registry.configure_nested_project_ignores(SystemPath::new("/ws"));

        let item = TestItem::leaf(
            "test_y",
            Some(SystemPathBuf::from("/ws/parent/child/tests/test_x.py")),
        );
        let groups =
            group_test_items_by_project(&[item], &projects, &NullEnvironmentProvider).await;

        assert_eq!(groups.len(), 1);
        let group = groups.values().next().unwrap();
        assert_eq!(group.project.project().root().as_str(), "/ws/parent/child");
    }
}

#[tokio::test]
async fn parent_project_learns_to_ignore_its_nested_child() {
    let provider = MockEnvironmentProvider::available()
        .with_project("parent", "/ws/parent")
        .with_project("child", "/ws/parent/child");
    let mut registry = registry(provider);

    registry
        .discover_and_register_projects(SystemPath::new("/ws"))
        .await;
    registry.configure_nested_project_ignores(SystemPath::new("/ws"));

    let parent = registry
        .get_projects_array(SystemPath::new("/ws"))
        .into_iter()
        .find(|adapter| adapter.project().root().as_str() == "/ws/parent")
        .unwrap();

    assert_eq!(
        parent.nested_ignores(),
        vec![SystemPathBuf::from("/ws/parent/child")]
    );
}

#[tokio::test]
async fn items_from_a_foreign_workspace_fall_out_of_the_run() {
    let provider = MockEnvironmentProvider::available().with_project("app", "/ws/app");
    let mut registry = registry(provider);
    let projects = registry
        .discover_and_register_projects(SystemPath::new("/ws"))
        .await;

    let items = vec![
        TestItem::leaf("kept", Some(SystemPathBuf::from("/ws/app/test_a.py"))),
        TestItem::leaf("dropped", Some(SystemPathBuf::from("/elsewhere/test_b.py"))),
    ];
    let groups = group_test_items_by_project(&items, &projects, &NullEnvironmentProvider).await;

    assert_eq!(groups.len(), 1);
    assert_eq!(groups.values().next().unwrap().items[0].id(), "kept");
}
