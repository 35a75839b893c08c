//! Provider adapter tests against a mocked HTTP server.
//!
//! Exercises each adapter's wire mapping, its provider-specific "not found"
//! convention, and the error mapping for bad statuses, bad bodies and
//! elapsed deadlines.

use std::time::Duration;

use cep_brasil::{
    AwesomeApiService, BrasilApiService, CepError, CepProvider, CepService, CorreiosService,
    OpenCepService, ViaCepService,
};
use reqwest::Client;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn viacep_maps_the_response_fields() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "cep": "01310-100",
        "logradouro": "Avenida Paulista",
        "complemento": "de 612 a 1510 - lado par",
        "bairro": "Bela Vista",
        "localidade": "São Paulo",
        "uf": "SP",
        "ibge": "3550308"
    });

    Mock::given(method("GET"))
        .and(path("/01310100/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let service = ViaCepService::with_base_url(Client::new(), server.uri());
    let address = service.find("01310-100").await.unwrap().unwrap();

    assert_eq!(address.uf.as_deref(), Some("SP"));
    assert_eq!(address.cidade.as_deref(), Some("São Paulo"));
    assert_eq!(address.bairro.as_deref(), Some("Bela Vista"));
    assert_eq!(address.logradouro.as_deref(), Some("Avenida Paulista"));
    assert_eq!(address.cep.as_deref(), Some("01310-100"));
    assert_eq!(address.ibge.as_deref(), Some("3550308"));
}

#[tokio::test]
async fn viacep_erro_payload_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/99999999/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"erro": true})))
        .mount(&server)
        .await;

    let service = ViaCepService::with_base_url(Client::new(), server.uri());
    let result = service.find("99999-999").await.unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn brasilapi_maps_the_response_fields() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "cep": "01310100",
        "state": "SP",
        "city": "São Paulo",
        "neighborhood": "Bela Vista",
        "street": "Avenida Paulista",
        "service": "correios"
    });

    Mock::given(method("GET"))
        .and(path("/01310100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let service = BrasilApiService::with_base_url(Client::new(), server.uri());
    let address = service.find("01310-100").await.unwrap().unwrap();

    assert_eq!(address.uf.as_deref(), Some("SP"));
    assert_eq!(address.cidade.as_deref(), Some("São Paulo"));
    assert_eq!(address.bairro.as_deref(), Some("Bela Vista"));
    assert_eq!(address.logradouro.as_deref(), Some("Avenida Paulista"));
}

#[tokio::test]
async fn brasilapi_404_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/99999999"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let service = BrasilApiService::with_base_url(Client::new(), server.uri());
    let result = service.find("99999999").await.unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn server_error_becomes_a_service_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/01310100"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let service = BrasilApiService::with_base_url(Client::new(), server.uri());
    let error = service.find("01310100").await.unwrap_err();

    match error {
        CepError::Service(message) => {
            assert!(message.contains("Houve um erro na requisição."));
            assert!(message.contains("500"));
        }
        other => panic!("expected service error, got {:?}", other),
    }
}

#[tokio::test]
async fn undecodable_body_becomes_a_service_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/01310100"))
        .respond_with(ResponseTemplate::new(200).set_body_string("isto não é JSON"))
        .mount(&server)
        .await;

    let service = BrasilApiService::with_base_url(Client::new(), server.uri());
    let error = service.find("01310100").await.unwrap_err();

    match error {
        CepError::Service(message) => assert!(message.contains("Failed to deserialize")),
        other => panic!("expected service error, got {:?}", other),
    }
}

#[tokio::test]
async fn empty_body_becomes_a_service_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/01310100"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let service = BrasilApiService::with_base_url(Client::new(), server.uri());
    let error = service.find("01310100").await.unwrap_err();

    assert_eq!(
        error,
        CepError::Service("Não foi possível encontrar o dado pesquisado.".to_string())
    );
}

#[tokio::test]
async fn awesomeapi_maps_district_and_address() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "cep": "01310100",
        "state": "SP",
        "city": "São Paulo",
        "district": "Bela Vista",
        "address": "Avenida Paulista"
    });

    Mock::given(method("GET"))
        .and(path("/01310100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let service = AwesomeApiService::with_base_url(Client::new(), server.uri());
    let address = service.find("01310100").await.unwrap().unwrap();

    assert_eq!(address.bairro.as_deref(), Some("Bela Vista"));
    assert_eq!(address.logradouro.as_deref(), Some("Avenida Paulista"));
}

#[tokio::test]
async fn opencep_uses_the_viacep_schema() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "cep": "01310-100",
        "logradouro": "Avenida Paulista",
        "bairro": "Bela Vista",
        "localidade": "São Paulo",
        "uf": "SP",
        "ibge": "3550308"
    });

    Mock::given(method("GET"))
        .and(path("/01310100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let service = OpenCepService::with_base_url(Client::new(), server.uri());
    let address = service.find("01310-100").await.unwrap().unwrap();

    assert_eq!(address.cidade.as_deref(), Some("São Paulo"));
    assert_eq!(address.ibge.as_deref(), Some("3550308"));
}

#[tokio::test]
async fn correios_scrapes_the_soap_response() {
    let server = MockServer::start().await;

    let body = concat!(
        "<soap:Envelope xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\">",
        "<soap:Body><return>",
        "<bairro>Bela Vista</bairro>",
        "<cep>01310100</cep>",
        "<cidade>São Paulo</cidade>",
        "<complemento2></complemento2>",
        "<end>Avenida Paulista</end>",
        "<uf>SP</uf>",
        "</return></soap:Body></soap:Envelope>"
    );

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("<cep>01310100</cep>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let service = CorreiosService::with_url(Client::new(), server.uri());
    let address = service.find("01310-100").await.unwrap().unwrap();

    assert_eq!(address.uf.as_deref(), Some("SP"));
    assert_eq!(address.cidade.as_deref(), Some("São Paulo"));
    assert_eq!(address.logradouro.as_deref(), Some("Avenida Paulista"));
}

#[tokio::test]
async fn correios_fault_becomes_a_service_error() {
    let server = MockServer::start().await;

    let fault = concat!(
        "<soap:Envelope><soap:Body><soap:Fault>",
        "<faultcode>soap:Server</faultcode>",
        "<faultstring>CEP NAO ENCONTRADO</faultstring>",
        "</soap:Fault></soap:Body></soap:Envelope>"
    );

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500).set_body_string(fault))
        .mount(&server)
        .await;

    let service = CorreiosService::with_url(Client::new(), server.uri());
    let error = service.find("99999999").await.unwrap_err();

    assert_eq!(error, CepError::Service("CEP NAO ENCONTRADO".to_string()));
}

#[tokio::test]
async fn elapsed_deadline_is_a_cancellation_not_a_service_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/01310100"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"cep": "01310100"}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let service = BrasilApiService::with_base_url(Client::new(), server.uri())
        .timeout(Duration::from_millis(20));
    let error = service.find("01310100").await.unwrap_err();

    assert!(matches!(error, CepError::Cancelled(_)), "got {:?}", error);
}

#[tokio::test]
async fn adapter_validates_before_any_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let service = ViaCepService::with_base_url(Client::new(), server.uri());
    let error = service.find("12").await.unwrap_err();

    assert_eq!(
        error,
        CepError::Validation("CEP com tamanho inválido.".to_string())
    );
}

#[tokio::test]
async fn orchestrator_falls_back_across_real_adapters() {
    let failing = MockServer::start().await;
    let working = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&failing)
        .await;

    Mock::given(method("GET"))
        .and(path("/01310100/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "cep": "01310-100",
            "logradouro": "Avenida Paulista",
            "bairro": "Bela Vista",
            "localidade": "São Paulo",
            "uf": "SP"
        })))
        .mount(&working)
        .await;

    let client = Client::new();
    let providers: Vec<Box<dyn CepProvider>> = vec![
        Box::new(BrasilApiService::with_base_url(client.clone(), failing.uri())),
        Box::new(ViaCepService::with_base_url(client, working.uri())),
    ];

    let service = CepService::with_providers(providers);
    let result = service.find("01310-100").await;

    assert!(result.success);
    let address = result.address.unwrap();
    assert_eq!(address.uf.as_deref(), Some("SP"));
    assert_eq!(address.cep.as_deref(), Some("01310-100"));
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].provider, "BrasilAPI");
}

#[tokio::test]
async fn supplied_client_survives_dropping_the_service() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = Client::new();
    let service = CepService::with_client(client.clone());
    drop(service);

    // The caller's handle keeps working after the service is gone.
    let response = client
        .get(format!("{}/ping", server.uri()))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
}
