//! End-to-end tests: run the generator against a client project on disk.
//!
//! The fixture project declares `IBookAppService` (plus `IAuthorAppService`,
//! which the server does not expose). The server description lists, in
//! order, a `Profile` service the client does not know about, a `Health`
//! controller that is not an application service, and the `Book` service.

mod common;

use std::fs;

use common::{PROJECT, ProjectFixture, load_fixture};
use proxygen_gen::errors::GeneratorError;
use proxygen_gen::generator::{GenerateProxyArgs, ProxyCommand, ProxyGenerator};
use proxygen_gen::source::{FileApiDescriptionSource, HttpApiDescriptionSource, JsonAssemblyReader};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn file_generator(
    fixture: &ProjectFixture,
) -> ProxyGenerator<FileApiDescriptionSource, JsonAssemblyReader> {
    ProxyGenerator::new(FileApiDescriptionSource::new(fixture.api_file()), JsonAssemblyReader)
}

#[tokio::test]
async fn generates_book_client_proxy() {
    let fixture = ProjectFixture::new();

    let report = file_generator(&fixture)
        .run(&GenerateProxyArgs::new(fixture.path()))
        .await
        .unwrap();

    assert_eq!(report.services_considered, 3);
    assert_eq!(report.proxies_generated(), 1);

    let proxy = fixture.read("ClientProxies/BookClientProxy.cs");
    let expected_header = "\
// This file is automatically generated by ABP framework to use MVC Controllers from CSharp
using System;
using Volo.Abp.Application.Dtos;
using Volo.Abp.Http.Client;
using Volo.Abp.Http.Modeling;
using Acme.BookStore.Books;
using System.Threading.Tasks;

namespace Acme.BookStore.ClientProxies
{
    public partial class BookClientProxy : ClientProxyBase<IBookAppService>, IBookAppService
    {
";
    assert!(
        proxy.starts_with(expected_header),
        "Unexpected header\nGenerated code:\n{}",
        proxy
    );

    for line in [
        "        public async Task<BookDto> GetAsync(Guid id)",
        "            return await MakeRequestAsync<BookDto>(action, id);",
        "        public async Task<PagedResultDto<BookDto>> GetListAsync(PagedAndSortedResultRequestDto input)",
        "            return await MakeRequestAsync<PagedResultDto<BookDto>>(action, input);",
        "        public async Task DeleteAsync(Guid id)",
        "            await MakeRequestAsync(action, id);",
    ] {
        assert!(
            proxy.lines().any(|l| l == line),
            "Missing line {:?}\nGenerated code:\n{}",
            line,
            proxy
        );
    }

    // Declared locally but not exposed by the server
    assert!(!proxy.contains("ExportAsync"));
    assert_eq!(proxy.matches("#region ActionApiDescriptionModel JSON").count(), 3);

    let get = proxy.find("GetAsync(Guid id)").unwrap();
    let list = proxy.find("GetListAsync(").unwrap();
    let delete = proxy.find("DeleteAsync(Guid id)").unwrap();
    assert!(get < list && list < delete);
}

#[tokio::test]
async fn embedded_descriptor_round_trips() {
    let fixture = ProjectFixture::new();
    file_generator(&fixture)
        .run(&GenerateProxyArgs::new(fixture.path()))
        .await
        .unwrap();

    let proxy = fixture.read("ClientProxies/BookClientProxy.cs");
    let literal = proxy
        .lines()
        .find_map(|l| l.trim().strip_prefix("var actionApiDescription = "))
        .and_then(|l| l.strip_suffix(';'))
        .unwrap();

    // A C# regular string literal with only \" and \\ escapes is also valid JSON
    let json: String = serde_json::from_str(literal).unwrap();
    let action: proxygen_define::ActionApiDescriptionModel = serde_json::from_str(&json).unwrap();
    assert_eq!(action.unique_name, "GetAsyncById");
    assert_eq!(action.url, "api/app/book/{id}");
}

#[tokio::test]
async fn writes_companion_file() {
    let fixture = ProjectFixture::new();
    file_generator(&fixture)
        .run(&GenerateProxyArgs::new(fixture.path()))
        .await
        .unwrap();

    assert_eq!(
        fixture.read("ClientProxies/BookClientProxy.extension.cs"),
        "\
// This file is part of BookClientProxy, you can customize it here
namespace Acme.BookStore.ClientProxies
{
    public partial class BookClientProxy
    {
    }
}
"
    );
}

#[tokio::test]
async fn skipped_services_produce_no_files() {
    let fixture = ProjectFixture::new();
    let report = file_generator(&fixture)
        .run(&GenerateProxyArgs::new(fixture.path()))
        .await
        .unwrap();

    assert_eq!(report.services_skipped, 2);

    let mut names: Vec<String> = fs::read_dir(fixture.proxies_dir())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["BookClientProxy.cs", "BookClientProxy.extension.cs"]);
}

#[tokio::test]
async fn skipped_services_before_a_match_do_not_stop_generation() {
    let fixture = ProjectFixture::new();
    let report = file_generator(&fixture)
        .run(&GenerateProxyArgs::new(fixture.path()))
        .await
        .unwrap();

    let expected = fixture.proxies_dir().join("BookClientProxy.cs");
    assert_eq!(report.proxies_generated(), 1);
    assert_eq!(report.files[0].path, expected);
    assert!(expected.exists());
}

#[tokio::test]
async fn regeneration_is_byte_identical() {
    let fixture = ProjectFixture::new();
    let generator = file_generator(&fixture);
    let args = GenerateProxyArgs::new(fixture.path());

    generator.run(&args).await.unwrap();
    let first = fixture.read("ClientProxies/BookClientProxy.cs");
    generator.run(&args).await.unwrap();
    let second = fixture.read("ClientProxies/BookClientProxy.cs");

    assert_eq!(first, second);
}

// Known gap: the customization file is not preserved across runs.
#[tokio::test]
async fn regeneration_overwrites_companion_edits() {
    let fixture = ProjectFixture::new();
    let generator = file_generator(&fixture);
    let args = GenerateProxyArgs::new(fixture.path());

    generator.run(&args).await.unwrap();
    fixture.write(
        "ClientProxies/BookClientProxy.extension.cs",
        "// my customizations\n",
    );
    generator.run(&args).await.unwrap();

    let companion = fixture.read("ClientProxies/BookClientProxy.extension.cs");
    assert!(!companion.contains("my customizations"));
    assert!(companion.contains("public partial class BookClientProxy"));
}

#[tokio::test]
async fn fetches_description_from_server() {
    let fixture = ProjectFixture::new();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/abp/api-definition"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(load_fixture("book-store-api.json"), "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let source = HttpApiDescriptionSource::new(Url::parse(&server.uri()).unwrap()).unwrap();
    let report = ProxyGenerator::new(source, JsonAssemblyReader)
        .run(&GenerateProxyArgs::new(fixture.path()))
        .await
        .unwrap();

    assert_eq!(report.proxies_generated(), 1);
    assert!(fixture.proxies_dir().join("BookClientProxy.cs").exists());
}

#[tokio::test]
async fn server_error_writes_nothing() {
    let fixture = ProjectFixture::new();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/abp/api-definition"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let source = HttpApiDescriptionSource::new(Url::parse(&server.uri()).unwrap()).unwrap();
    let err = ProxyGenerator::new(source, JsonAssemblyReader)
        .run(&GenerateProxyArgs::new(fixture.path()))
        .await
        .unwrap_err();

    assert!(matches!(err, GeneratorError::HttpStatus { status: 503, .. }));
    assert!(!err.is_usage_error());
    assert!(!fixture.proxies_dir().exists());
}

#[tokio::test]
async fn missing_build_output_is_reported() {
    let fixture = ProjectFixture::bare();
    fixture.write(
        &format!("{PROJECT}.csproj"),
        &load_fixture(&format!("{PROJECT}.csproj")),
    );
    fixture.write("api-definition.json", &load_fixture("book-store-api.json"));

    let err = file_generator(&fixture)
        .run(&GenerateProxyArgs::new(fixture.path()))
        .await
        .unwrap_err();

    assert!(matches!(err, GeneratorError::Metadata { .. }));
}

#[tokio::test]
async fn remove_deletes_generated_folder() {
    let fixture = ProjectFixture::new();
    let generator = file_generator(&fixture);
    generator
        .run(&GenerateProxyArgs::new(fixture.path()))
        .await
        .unwrap();
    assert!(fixture.proxies_dir().exists());

    let args = GenerateProxyArgs {
        command: ProxyCommand::Remove,
        ..GenerateProxyArgs::new(fixture.path())
    };
    let report = generator.run(&args).await.unwrap();

    assert_eq!(report.removed, Some(fixture.proxies_dir()));
    assert!(!fixture.proxies_dir().exists());
    assert!(fixture.path().join(format!("{PROJECT}.csproj")).exists());

    // Second removal finds nothing to do
    let report = generator.run(&args).await.unwrap();
    assert_eq!(report.removed, None);
}
