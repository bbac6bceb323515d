//! Integration tests for the request/response protocol combined with the
//! board rules, as the host applies them to one front-end session.

use kanban_core::{
    active_tasks, decode_action, encode_response, Action, Response, Task, TaskStatus,
    ONE_DAY_IN_SECONDS,
};

const NOW: u64 = 1_700_000_000;

#[test]
fn test_store_request_filters_into_tasks_reply() {
    // Arrange: the front-end stores one stale done task and one live task
    let request = format!(
        r#"{{"cmd":"StoreTasks","tasks":[
            {{"subject":"shipped","status":"Done","priority":1,"wait_until":null,"updated":{old}}},
            {{"subject":"plan q3","status":"Todo","priority":2,"wait_until":null,"updated":{now}}}
        ]}}"#,
        old = NOW - ONE_DAY_IN_SECONDS - 60,
        now = NOW,
    );

    // Act
    let tasks = match decode_action(&request).expect("request must decode") {
        Action::StoreTasks { tasks } => tasks,
        other => panic!("unexpected action {other:?}"),
    };
    let reply = encode_response(&Response::Tasks {
        tasks: active_tasks(&tasks, NOW),
    })
    .expect("reply must encode");

    // Assert
    let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
    assert_eq!(value["data"], "Tasks");
    assert_eq!(value["tasks"].as_array().unwrap().len(), 1);
    assert_eq!(value["tasks"][0]["subject"], "plan q3");
}

#[test]
fn test_reply_for_woken_task_reports_in_progress() {
    let mut task = Task::new("follow up", TaskStatus::Snooze, NOW - 100);
    task.wait_until = Some(NOW - 1);

    let reply = encode_response(&Response::Tasks {
        tasks: active_tasks(&[task], NOW),
    })
    .unwrap();

    assert!(reply.contains(r#""status":"InProgress""#));
    assert!(reply.contains(r#""wait_until":null"#));
}
