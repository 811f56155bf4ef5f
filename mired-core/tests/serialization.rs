use mired_core::*;
use mired_core::utils::format_timestamp;
use serde_json::{self as json, json as j, Value};

fn to_value<T: serde::Serialize>(v: &T) -> Value {
    json::to_value(v).expect("serialize")
}

fn ana() -> UserProfile {
    UserProfile {
        id: 2,
        firstname: "Ana".to_string(),
        lastname: "Garcia".to_string(),
        telefono: Some("0990000002".to_string()),
        direccion: Some("Guayaquil".to_string()),
        email: Some("ana@example.com".to_string()),
        img_url: None,
    }
}

/*
    Obiettivo test: la risposta di endpoint=contactos ha esattamente i campi attesi dai client,
    con `ciudad` presa dall'indirizzo e il placeholder per l'immagine mancante.
*/
#[test]
fn contactos_response_shape() {
    let c = Contacto::new(&ana(), "2024-05-01 10:00:00".to_string(), RatingSummary::from_scores(&[4, 5]));
    let v = to_value(&ContactosResponse { success: true, contactos: vec![c] });

    assert_eq!(v["success"], true);
    let c = &v["contactos"][0];
    assert_eq!(c["id"], 2);
    assert_eq!(c["nombre"], "Ana Garcia");
    assert_eq!(c["telefono"], "0990000002");
    assert_eq!(c["ciudad"], "Guayaquil");
    assert_eq!(c["email"], "ana@example.com");
    assert_eq!(c["imagen"], DEFAULT_AVATAR);
    assert_eq!(c["fecha_conexion"], "2024-05-01 10:00:00");
    assert_eq!(c["calificacion"], j!({"promedio": 4.5, "total": 2}));
    assert_eq!(c.as_object().map(|o| o.len()), Some(8));
}

#[test]
fn agentes_response_shape() {
    let mut user = ana();
    user.img_url = Some("uploads/ana.png".to_string());
    user.telefono = None;
    let a = Agente::new(&user, RatingSummary::EMPTY, true);
    let v = to_value(&AgentesResponse { success: true, agentes: vec![a] });

    let a = &v["agentes"][0];
    assert_eq!(a["imagen"], "uploads/ana.png");
    assert!(a["telefono"].is_null());
    assert_eq!(a["ya_invitado"], true);
    assert_eq!(a["calificacion"], j!({"promedio": 0.0, "total": 0}));
    assert!(a.get("fecha_conexion").is_none());
}

#[test]
fn invitacion_uses_requester_profile_and_edge_date() {
    let edge = Connection {
        id: 17,
        requester_id: 2,
        recipient_id: 9,
        state: ConnectionState::Pending,
        created_at: "2024-06-15 08:30:00".to_string(),
    };
    let mut user = ana();
    user.img_url = Some("   ".to_string());
    let v = to_value(&Invitacion::new(&edge, &user));

    assert_eq!(
        v,
        j!({
            "id_mired": 17,
            "id_remitente": 2,
            "nombre": "Ana Garcia",
            "telefono": "0990000002",
            "imagen": "img/default.jpg",
            "fecha_invitacion": "2024-06-15 08:30:00"
        })
    );
}

#[test]
fn conexion_and_estado_wire_names() {
    let edge = Connection {
        id: 3,
        requester_id: 1,
        recipient_id: 2,
        state: ConnectionState::Accepted,
        created_at: "2024-01-01 00:00:00".to_string(),
    };
    let v = to_value(&ConexionResponse { success: true, conexion: edge.into() });
    assert_eq!(v["conexion"]["estado"], "aceptada");
    assert_eq!(v["conexion"]["id_destinatario"], 2);

    let v = to_value(&EstadoResponse { success: true, estado: InvitationStatus::PendingIncoming });
    assert_eq!(v["estado"], "pendiente_recibida");
}

#[test]
fn error_body_is_single_field() {
    let v = to_value(&ErrorBody::new("user_id requerido"));
    assert_eq!(v, j!({"error": "user_id requerido"}));
}

#[test]
fn invitar_request_user_id_is_optional() {
    let req: InvitarRequest = json::from_str(r#"{"destinatario_id": 5}"#).expect("deserialize");
    assert_eq!(req.user_id, None);
    assert_eq!(req.destinatario_id, 5);
}

#[test]
fn rating_summary_mean_rounded_to_one_decimal() {
    assert_eq!(RatingSummary::from_scores(&[]), RatingSummary { promedio: 0.0, total: 0 });
    assert_eq!(RatingSummary::from_scores(&[4, 5, 3]), RatingSummary { promedio: 4.0, total: 3 });
    assert_eq!(RatingSummary::from_scores(&[5, 4, 4]), RatingSummary { promedio: 4.3, total: 3 });
    assert_eq!(RatingSummary::from_scores(&[1, 2]), RatingSummary { promedio: 1.5, total: 2 });
    assert_eq!(RatingSummary::from_aggregate(None, 0), RatingSummary::EMPTY);
    assert_eq!(RatingSummary::from_aggregate(Some(3.666), 3).promedio, 3.7);
}

#[test]
fn connection_state_maps_estado_column() {
    assert_eq!(ConnectionState::from_estado(0), Some(ConnectionState::Pending));
    assert_eq!(ConnectionState::from_estado(1), Some(ConnectionState::Accepted));
    assert_eq!(ConnectionState::from_estado(2), None);
    assert_eq!(ConnectionState::Accepted.estado(), 1);
}

#[test]
fn invitation_status_from_viewer_side() {
    let edge = Connection {
        id: 1,
        requester_id: 1,
        recipient_id: 2,
        state: ConnectionState::Pending,
        created_at: "2024-01-01 00:00:00".to_string(),
    };
    assert_eq!(InvitationStatus::for_viewer(None, 1), InvitationStatus::NoRelationship);
    assert_eq!(InvitationStatus::for_viewer(Some(&edge), 1), InvitationStatus::PendingOutgoing);
    assert_eq!(InvitationStatus::for_viewer(Some(&edge), 2), InvitationStatus::PendingIncoming);
    assert_eq!(edge.peer_of(2), Some(1));
    assert_eq!(edge.peer_of(3), None);

    let accepted = Connection { state: ConnectionState::Accepted, ..edge };
    assert_eq!(InvitationStatus::for_viewer(Some(&accepted), 2), InvitationStatus::Connected);
    assert!(accepted.involves(1));
}

#[test]
fn timestamps_are_fixed_width_datetime() {
    let t = time::OffsetDateTime::from_unix_timestamp(1_714_557_600).expect("valid");
    assert_eq!(format_timestamp(t).expect("format"), "2024-05-01 10:00:00");
    let now = now_timestamp().expect("format");
    assert_eq!(now.len(), 19);
    assert_eq!(&now[10..11], " ");
}
