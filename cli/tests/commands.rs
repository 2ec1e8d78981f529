//! Drive the terminal commands against a live mock server.

use todoapp_cli::render::render;
use todoapp_cli::{Command, Executor};
use todoapp_core::{ErrorMessage, Session, TodoClient, ViewModel};

fn start_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });
    addr
}

fn run(session: &mut Session, executor: &Executor, line: &str) {
    let command: Command = line.parse().unwrap();
    let pending = command.dispatch(session);
    executor.run(session, pending);
}

#[test]
fn commands_round_trip_through_the_server() {
    let addr = start_server();
    let executor = Executor::new();
    let mut session = Session::new(TodoClient::new(&format!("http://{addr}"), 3));

    run(&mut session, &executor, "reload");
    for title in ["one", "two", "three", "four"] {
        run(&mut session, &executor, &format!("add {title}"));
    }
    assert_eq!(session.state().todos.len(), 4);

    // Completes all four concurrently.
    run(&mut session, &executor, "toggle-all");
    assert_eq!(session.state().active_count(), 0);
    assert!(session.state().loading.is_empty());

    let first = session.state().todos[0].id;
    run(&mut session, &executor, &format!("toggle {first}"));
    run(&mut session, &executor, "clear");
    let titles: Vec<&str> = session.state().todos.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["one"]);

    run(&mut session, &executor, &format!("rename {first} uno"));
    assert_eq!(session.state().find(first).unwrap().title, "uno");

    run(&mut session, &executor, "add    ");
    assert_eq!(session.state().error_message(), Some(ErrorMessage::EmptyTitle));
    let text = render(&ViewModel::from_state(session.state()));
    assert!(text.contains("uno"));
    assert!(text.contains("! Title should not be empty"));

    run(&mut session, &executor, &format!("edit {first}"));
    run(&mut session, &executor, "draft ");
    run(&mut session, &executor, "save");
    assert!(session.state().todos.is_empty());
}

#[test]
fn transport_failure_is_reported_not_raised() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let executor = Executor::new();
    let mut session = Session::new(TodoClient::new(&format!("http://{addr}"), 3));

    run(&mut session, &executor, "add offline");
    assert_eq!(session.state().error_message(), Some(ErrorMessage::AddFailed));
    assert!(session.state().placeholder.is_none());
    assert_eq!(session.state().new_title, "offline");
}
