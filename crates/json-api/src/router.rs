//! App Router

use salvo::Router;

use crate::{
    applications, auth, candidates, events, invitations, organizations, permissions, tasks, teams,
    users,
};

/// Routes for invited candidates, authorized by the application token alone.
pub fn applications_router() -> Router {
    Router::with_path("applications/{token}")
        .get(applications::get::handler)
        .post(applications::submit::handler)
        .push(Router::with_path("documents").post(applications::documents::handler))
}

/// Routes that require a bearer session.
pub fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(Router::with_path("me").get(users::me::handler))
        .push(organizations_router())
        .push(
            Router::with_path("invitations")
                .get(invitations::mine::handler)
                .push(
                    Router::with_path("{invitation}/accept").post(invitations::accept::handler),
                ),
        )
        .push(teams_router())
        .push(
            Router::with_path("tasks/{task}")
                .get(tasks::get::handler)
                .put(tasks::update::handler)
                .delete(tasks::delete::handler)
                .push(Router::with_path("comments").post(tasks::comments::create::handler)),
        )
        .push(
            Router::with_path("events/{event}")
                .get(events::get::handler)
                .put(events::update::handler)
                .delete(events::delete::handler)
                .push(Router::with_path("attendance").put(events::attendance::update::handler)),
        )
        .push(
            Router::with_path("candidates/{candidate}")
                .get(candidates::get::handler)
                .push(Router::with_path("status").put(candidates::status::handler)),
        )
}

fn organizations_router() -> Router {
    Router::with_path("organizations")
        .get(organizations::index::handler)
        .post(organizations::create::handler)
        .push(Router::with_path("current").get(organizations::current::handler))
        .push(
            Router::with_path("{organization}")
                .get(organizations::get::handler)
                .push(Router::with_path("permissions").get(permissions::check::handler))
                .push(
                    Router::with_path("members")
                        .get(organizations::members::index::handler)
                        .push(
                            Router::with_path("{member}")
                                .put(organizations::members::update::handler),
                        ),
                )
                .push(
                    Router::with_path("invitations")
                        .get(invitations::index::handler)
                        .post(invitations::create::handler),
                )
                .push(
                    Router::with_path("teams")
                        .get(teams::index::handler)
                        .post(teams::create::handler),
                )
                .push(
                    Router::with_path("tasks")
                        .get(tasks::index::handler)
                        .post(tasks::create::handler)
                        .push(Router::with_path("mine").get(tasks::mine::handler)),
                )
                .push(
                    Router::with_path("events")
                        .get(events::index::handler)
                        .post(events::create::handler)
                        .push(Router::with_path("all").get(events::all::handler)),
                )
                .push(
                    Router::with_path("candidates")
                        .get(candidates::index::handler)
                        .post(candidates::create::handler),
                ),
        )
}

fn teams_router() -> Router {
    Router::with_path("teams/{team}")
        .get(teams::get::handler)
        .put(teams::update::handler)
        .delete(teams::delete::handler)
        .push(
            Router::with_path("members")
                .post(teams::members::create::handler)
                .push(
                    Router::with_path("{user}")
                        .put(teams::members::update::handler)
                        .delete(teams::members::delete::handler),
                ),
        )
        .push(Router::with_path("tasks").get(tasks::team_index::handler))
        .push(Router::with_path("events").get(events::team_index::handler))
}
