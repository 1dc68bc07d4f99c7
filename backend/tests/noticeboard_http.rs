//! End-to-end HTTP coverage over in-memory storage.
//!
//! The app is wired the way the server wires it: session cookies, the login
//! redirect, and trace ids around the full route table.

use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use chrono::{Duration, Utc};
use mockable::DefaultClock;
use noticeboard::Trace;
use noticeboard::domain::ports::NewsRepository;
use noticeboard::domain::{NewNews, NewsService, NotesService, TRACE_ID_HEADER, UserId};
use noticeboard::inbound::http::configure_routes;
use noticeboard::inbound::http::error::json_error_handler;
use noticeboard::inbound::http::state::HttpState;
use noticeboard::middleware::LoginRedirect;
use noticeboard::outbound::accounts::{Account, AccountsLoginService};
use noticeboard::outbound::memory::{
    InMemoryCommentRepository, InMemoryNewsRepository, InMemoryNoteRepository,
};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use url::Url;

const ALICE: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
const BOB: &str = "9b2c1a5e-0f51-4d6c-8f1a-6c2a8e1d4b7f";

struct Stores {
    notes: Arc<InMemoryNoteRepository>,
    news: Arc<InMemoryNewsRepository>,
    comments: Arc<InMemoryCommentRepository>,
}

#[fixture]
fn stores() -> Stores {
    Stores {
        notes: Arc::new(InMemoryNoteRepository::default()),
        news: Arc::new(InMemoryNewsRepository::default()),
        comments: Arc::new(InMemoryCommentRepository::default()),
    }
}

fn accounts() -> AccountsLoginService {
    let account = |id: &str, username: &str| Account {
        id: UserId::new(id).expect("fixture id"),
        username: username.to_owned(),
        password: format!("{username}-password"),
    };
    AccountsLoginService::new(vec![account(ALICE, "alice"), account(BOB, "bob")])
        .expect("unique usernames")
}

fn state(stores: &Stores) -> web::Data<HttpState> {
    let notes = Arc::new(NotesService::new(stores.notes.clone()));
    let news = Arc::new(NewsService::new(
        stores.news.clone(),
        stores.comments.clone(),
        Arc::new(DefaultClock),
    ));
    web::Data::new(HttpState::new(
        Arc::new(accounts()),
        notes.clone(),
        notes,
        news.clone(),
        news,
    ))
}

async fn app(
    stores: &Stores,
) -> impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
{
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    test::init_service(
        App::new()
            .app_data(state(stores))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .wrap(LoginRedirect)
            .wrap(session)
            .wrap(Trace)
            .configure(configure_routes),
    )
    .await
}

async fn login<S, B>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/auth/login/")
            .set_json(json!({ "username": username, "password": format!("{username}-password") }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND, "login as {username}");
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

fn location<B>(res: &ServiceResponse<B>) -> Option<String> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

fn get(uri: &str, cookie: Option<&Cookie<'static>>) -> actix_http::Request {
    let mut request = test::TestRequest::get().uri(uri);
    if let Some(cookie) = cookie {
        request = request.cookie(cookie.clone());
    }
    request.to_request()
}

fn post(uri: &str, cookie: &Cookie<'static>, body: &Value) -> actix_http::Request {
    test::TestRequest::post()
        .uri(uri)
        .cookie(cookie.clone())
        .set_json(body)
        .to_request()
}

async fn comment_texts<S, B>(app: &S, viewer: &Cookie<'static>) -> Vec<String>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let detail: Value = test::read_body_json(test::call_service(app, get("/news/1/", Some(viewer))).await).await;
    detail["comments"]
        .as_array()
        .expect("comments")
        .iter()
        .map(|comment| comment["text"].as_str().expect("text").to_owned())
        .collect()
}

async fn seed_news(stores: &Stores, count: i64) {
    let today = Utc::now().date_naive();
    for offset in 0..count {
        stores
            .news
            .insert(NewNews {
                title: format!("Новость {offset}"),
                text: "Просто текст.".to_owned(),
                date: today - Duration::days(offset),
            })
            .await
            .expect("seed news");
    }
}

#[rstest]
#[case("/notes/")]
#[case("/add/")]
#[case("/done/")]
#[case("/note/any/")]
#[case("/edit/any/")]
#[case("/delete/any/")]
#[case("/edit_comment/1/")]
#[case("/delete_comment/1/")]
#[actix_web::test]
async fn anonymous_visitors_are_sent_to_login(stores: Stores, #[case] path: &str) {
    let app = app(&stores).await;

    let res = test::call_service(&app, get(path, None)).await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), Some(format!("/auth/login/?next={path}")));
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
}

#[rstest]
#[actix_web::test]
async fn note_lifecycle_respects_ownership(stores: Stores) {
    let app = app(&stores).await;
    let alice = login(&app, "alice").await;
    let bob = login(&app, "bob").await;

    let created = test::call_service(
        &app,
        post(
            "/add/",
            &alice,
            &json!({ "title": "Новый заголовок", "text": "Текст" }),
        ),
    )
    .await;
    assert_eq!(location(&created).as_deref(), Some("/done/"));

    let list: Value = test::read_body_json(test::call_service(&app, get("/notes/", Some(&alice))).await).await;
    assert_eq!(list[0]["slug"], "novyij-zagolovok");
    assert_eq!(list[0]["author"], ALICE);

    let foreign = test::call_service(&app, get("/note/novyij-zagolovok/", Some(&bob))).await;
    assert_eq!(foreign.status(), StatusCode::NOT_FOUND);
    let missing = test::call_service(&app, get("/note/nothing-here/", Some(&bob))).await;
    let foreign_body: Value = test::read_body_json(foreign).await;
    let missing_body: Value = test::read_body_json(missing).await;
    assert_eq!(foreign_body["message"], missing_body["message"]);

    let hijack = test::call_service(
        &app,
        post(
            "/edit/novyij-zagolovok/",
            &bob,
            &json!({ "title": "Чужой", "text": "Чужой текст" }),
        ),
    )
    .await;
    assert_eq!(hijack.status(), StatusCode::NOT_FOUND);

    let bob_list: Value = test::read_body_json(test::call_service(&app, get("/notes/", Some(&bob))).await).await;
    assert_eq!(bob_list, json!([]));

    let edited = test::call_service(
        &app,
        post(
            "/edit/novyij-zagolovok/",
            &alice,
            &json!({ "title": "Новый заголовок", "text": "Обновлённый текст", "slug": "novyij-zagolovok" }),
        ),
    )
    .await;
    assert_eq!(location(&edited).as_deref(), Some("/done/"));

    let detail: Value =
        test::read_body_json(test::call_service(&app, get("/note/novyij-zagolovok/", Some(&alice))).await).await;
    assert_eq!(detail["text"], "Обновлённый текст");

    let deleted = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri("/delete/novyij-zagolovok/")
            .cookie(alice.clone())
            .to_request(),
    )
    .await;
    assert_eq!(location(&deleted).as_deref(), Some("/done/"));
    assert_eq!(stores.notes.count().expect("count"), 0);
}

#[rstest]
#[actix_web::test]
async fn duplicate_slug_is_rejected_with_the_form(stores: Stores) {
    let app = app(&stores).await;
    let alice = login(&app, "alice").await;
    let first = json!({ "title": "Первая", "text": "Текст", "slug": "shared" });
    test::call_service(&app, post("/add/", &alice, &first)).await;

    let second = json!({ "title": "Вторая", "text": "Другой текст", "slug": "shared" });
    let res = test::call_service(&app, post("/add/", &alice, &second)).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["details"]["field"], "slug");
    assert_eq!(body["details"]["form"]["title"], "Вторая");
    assert!(
        body["message"]
            .as_str()
            .is_some_and(|message| message.starts_with("shared - "))
    );
    assert_eq!(stores.notes.count().expect("count"), 1);
}

#[rstest]
#[actix_web::test]
async fn home_page_shows_ten_newest_and_links_onward(stores: Stores) {
    seed_news(&stores, 11).await;
    let app = app(&stores).await;

    let first: Value = test::read_body_json(test::call_service(&app, get("/", None)).await).await;
    let items = first["data"].as_array().expect("data");
    assert_eq!(items.len(), 10);
    let dates: Vec<&str> = items
        .iter()
        .map(|item| item["date"].as_str().expect("date"))
        .collect();
    assert!(dates.windows(2).all(|pair| pair[0] > pair[1]));

    let next = Url::parse(first["links"]["next"].as_str().expect("next link")).expect("url");
    let uri = format!("{}?{}", next.path(), next.query().unwrap_or_default());
    let second: Value = test::read_body_json(test::call_service(&app, get(&uri, None)).await).await;
    assert_eq!(second["data"].as_array().map(Vec::len), Some(1));
    assert!(second["links"].get("next").is_none());
}

#[rstest]
#[actix_web::test]
async fn comments_are_moderated_and_listed_oldest_first(stores: Stores) {
    seed_news(&stores, 1).await;
    let app = app(&stores).await;
    let alice = login(&app, "alice").await;

    for text in ["Первый", "Второй", "Третий"] {
        let res = test::call_service(&app, post("/news/1/", &alice, &json!({ "text": text }))).await;
        assert_eq!(location(&res).as_deref(), Some("/news/1/#comments"));
    }

    for _ in 0..2 {
        let rude = test::call_service(
            &app,
            post("/news/1/", &alice, &json!({ "text": "Какой-то текст, редиска, еще текст" })),
        )
        .await;
        assert_eq!(rude.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(rude).await;
        assert_eq!(body["message"], "Не ругайтесь!");
        assert_eq!(body["details"]["form"]["text"], "Какой-то текст, редиска, еще текст");
        assert_eq!(stores.comments.count().expect("count"), 3);
    }

    let detail: Value =
        test::read_body_json(test::call_service(&app, get("/news/1/", Some(&alice))).await).await;
    let texts: Vec<&str> = detail["comments"]
        .as_array()
        .expect("comments")
        .iter()
        .map(|comment| comment["text"].as_str().expect("text"))
        .collect();
    assert_eq!(texts, vec!["Первый", "Второй", "Третий"]);
    assert_eq!(detail["commentForm"], true);
}

#[rstest]
#[actix_web::test]
async fn only_the_author_may_touch_a_comment(stores: Stores) {
    seed_news(&stores, 1).await;
    let app = app(&stores).await;
    let alice = login(&app, "alice").await;
    let bob = login(&app, "bob").await;
    test::call_service(&app, post("/news/1/", &alice, &json!({ "text": "Мой комментарий" }))).await;

    for path in ["/edit_comment/1/", "/delete_comment/1/"] {
        let res = test::call_service(&app, get(path, Some(&bob))).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{path}");
    }
    let hijack = test::call_service(
        &app,
        post("/edit_comment/1/", &bob, &json!({ "text": "Чужой текст" })),
    )
    .await;
    assert_eq!(hijack.status(), StatusCode::NOT_FOUND);
    assert_eq!(comment_texts(&app, &alice).await, vec!["Мой комментарий"]);

    let edited = test::call_service(
        &app,
        post("/edit_comment/1/", &alice, &json!({ "text": "Исправленный комментарий" })),
    )
    .await;
    assert_eq!(location(&edited).as_deref(), Some("/news/1/#comments"));
    assert_eq!(comment_texts(&app, &alice).await, vec!["Исправленный комментарий"]);

    let removal = test::call_service(&app, post("/delete_comment/1/", &bob, &json!({}))).await;
    assert_eq!(removal.status(), StatusCode::NOT_FOUND);
    assert_eq!(stores.comments.count().expect("count"), 1);

    let removed = test::call_service(&app, post("/delete_comment/1/", &alice, &json!({}))).await;
    assert_eq!(location(&removed).as_deref(), Some("/news/1/#comments"));
    assert_eq!(stores.comments.count().expect("count"), 0);
}

#[rstest]
#[actix_web::test]
async fn anonymous_news_detail_has_no_comment_form(stores: Stores) {
    seed_news(&stores, 1).await;
    let app = app(&stores).await;

    let detail: Value = test::read_body_json(test::call_service(&app, get("/news/1/", None)).await).await;

    assert_eq!(detail["commentForm"], false);
    assert_eq!(detail["news"]["id"], 1);
}

#[rstest]
#[case("/add/", "title=Заголовок&text=Текст")]
#[case("/news/1/", "text=Текст")]
#[actix_web::test]
async fn anonymous_form_posts_are_sent_to_login(
    stores: Stores,
    #[case] path: &str,
    #[case] body: &str,
) {
    seed_news(&stores, 1).await;
    let app = app(&stores).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(path)
            .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
            .set_payload(body.to_owned())
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), Some(format!("/auth/login/?next={path}")));
    assert_eq!(stores.notes.count().expect("count"), 0);
    assert_eq!(stores.comments.count().expect("count"), 0);
}
