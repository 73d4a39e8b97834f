//! Entity CRUD routes, one nested router per table under its path segment.

use crate::handlers::entity::{brews_by_bean, create, delete, list, list_by, read, update};
use crate::models::{
    Bag, BagGrinderSuggestion, Barista, Bean, BeanGrinderSuggestion, Brew, Entity, Grinder, Machine, Roaster,
};
use crate::state::AppState;
use axum::{routing::get, Router};

/// `/` and `/:id` for one record type.
pub fn crud_routes<E: Entity>() -> Router<AppState> {
    Router::new()
        .route("/", get(list::<E>).post(create::<E>))
        .route("/:id", get(read::<E>).put(update::<E>).delete(delete::<E>))
}

fn mount<E: Entity>(app: Router<AppState>, filtered: Router<AppState>) -> Router<AppState> {
    let prefix = format!("/{}", E::table().path_segment);
    app.nest(&prefix, crud_routes::<E>().merge(filtered))
}

pub fn entity_routes() -> Router<AppState> {
    let app = Router::new();
    let app = mount::<Roaster>(app, Router::new());
    let app = mount::<Bean>(
        app,
        Router::new().route("/roaster/:roaster_id", list_by::<Bean>("roaster_id")),
    );
    let app = mount::<Bag>(app, Router::new().route("/bean/:bean_id", list_by::<Bag>("bean_id")));
    let app = mount::<Grinder>(app, Router::new());
    let app = mount::<Machine>(app, Router::new());
    let app = mount::<Barista>(app, Router::new());
    let app = mount::<Brew>(
        app,
        Router::new()
            .route("/barista/:barista_id", list_by::<Brew>("barista_id"))
            .route("/bag/:bag_id", list_by::<Brew>("bag_id"))
            .route("/bean/:bean_id", get(brews_by_bean)),
    );
    let app = mount::<BeanGrinderSuggestion>(
        app,
        Router::new()
            .route("/bean/:bean_id", list_by::<BeanGrinderSuggestion>("bean_id"))
            .route("/grinder/:grinder_id", list_by::<BeanGrinderSuggestion>("grinder_id")),
    );
    mount::<BagGrinderSuggestion>(
        app,
        Router::new()
            .route("/bag/:bag_id", list_by::<BagGrinderSuggestion>("bag_id"))
            .route("/grinder/:grinder_id", list_by::<BagGrinderSuggestion>("grinder_id")),
    )
}
