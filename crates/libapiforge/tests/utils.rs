// Dead code detection breaks here, because the integration test crates all use a disjoint set of
// the fixtures.
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// A trimmed copy of the published documentation page.
pub const PAGE: &str = r##"<!DOCTYPE html>
<html>
<head><title>Bot API</title></head>
<body>
<div id="dev_page_content">
<h3><a class="anchor" name="authorizing-your-bot" href="#authorizing-your-bot"></a>Authorizing your bot</h3>
<p>Each bot is given a unique authentication token when it is created.</p>
<h4><a class="anchor" href="#using-a-local-bot-api-server"></a>Using a Local Bot API Server</h4>
<h3><a class="anchor" name="getting-updates" href="#getting-updates"><i class="anchor-icon"></i></a>Getting updates</h3>
<p>There are two mutually exclusive ways of receiving updates for your bot.</p>
<h4><a class="anchor" name="update" href="#update"><i class="anchor-icon"></i></a>Update</h4>
<p>This <a href="#available-types">object</a> represents an incoming update.</p>
<table class="table">
<thead>
<tr><th>Field</th><th>Type</th><th>Description</th></tr>
</thead>
<tbody>
<tr><td>update_id</td><td>Integer</td><td>The update's unique identifier.</td></tr>
<tr><td>message</td><td><a href="#message">Message</a></td><td><em>Optional</em>. New incoming message of any kind.</td></tr>
</tbody>
</table>
<h4><a class="anchor" name="getupdates" href="#getupdates"><i class="anchor-icon"></i></a>getUpdates</h4>
<p>Use this method to receive incoming updates using long polling. An Array of <a href="#update">Update</a> objects is returned.</p>
<table class="table">
<thead>
<tr><th>Parameter</th><th>Type</th><th>Required</th><th>Description</th></tr>
</thead>
<tbody>
<tr><td>offset</td><td>Integer</td><td>Optional</td><td>Identifier of the first update to be returned.</td></tr>
<tr><td>allowed_updates</td><td>Array of String</td><td>Optional</td><td>A JSON-serialized list of update types.</td></tr>
</tbody>
</table>
<h4><a class="anchor" name="getwebhookinfo" href="#getwebhookinfo"><i class="anchor-icon"></i></a>getWebhookInfo</h4>
<p>Use this method to get current webhook status. Requires no parameters. On success, returns a <a href="#webhookinfo">WebhookInfo</a> object.</p>
<h3><a class="anchor" name="available-types" href="#available-types"><i class="anchor-icon"></i></a>Available types</h3>
<h4><a class="anchor" name="user" href="#user"><i class="anchor-icon"></i></a>User</h4>
<p>This object represents a Telegram user or bot.</p>
<table class="table">
<thead>
<tr><th>Field</th><th>Type</th><th>Description</th></tr>
</thead>
<tbody>
<tr><td>id</td><td>Integer</td><td>Unique identifier for this user or bot.</td></tr>
<tr><td>is_bot</td><td>Boolean</td><td><em>True</em>, if this user is a bot</td></tr>
<tr><td>username</td><td>String</td><td><em>Optional</em>. User's or bot's username</td></tr>
</tbody>
</table>
<h4><a class="anchor" name="message" href="#message"><i class="anchor-icon"></i></a>Message</h4>
<p>This object represents a message.</p>
<table class="table">
<thead>
<tr><th>Field</th><th>Type</th><th>Description</th></tr>
</thead>
<tbody>
<tr><td>message_id</td><td>Integer</td><td>Unique message identifier inside this chat</td></tr>
<tr><td>from</td><td><a href="#user">User</a></td><td><em>Optional</em>. Sender of the message</td></tr>
<tr><td>photo</td><td>Array of <a href="#photosize">PhotoSize</a></td><td><em>Optional</em>. Message is a photo</td></tr>
</tbody>
</table>
<h4><a class="anchor" name="formatting-options" href="#formatting-options"><i class="anchor-icon"></i></a>Formatting options</h4>
<p>The Bot API supports basic formatting for messages.</p>
<h3><a class="anchor" name="available-methods" href="#available-methods"><i class="anchor-icon"></i></a>Available methods</h3>
<h4><a class="anchor" name="getme" href="#getme"><i class="anchor-icon"></i></a>getMe</h4>
<p>A simple method for testing your bot's authentication token. Requires no parameters. Returns basic information about the bot in form of a <a href="#user">User</a> object.</p>
<h4><a class="anchor" name="sendmessage" href="#sendmessage"><i class="anchor-icon"></i></a>sendMessage</h4>
<p>Use this method to send text messages. On success, the sent <a href="#message">Message</a> is returned.</p>
<table class="table">
<thead>
<tr><th>Parameter</th><th>Type</th><th>Required</th><th>Description</th></tr>
</thead>
<tbody>
<tr><td>chat_id</td><td>Integer or String</td><td>Yes</td><td>Unique identifier for the target chat</td></tr>
<tr><td>text</td><td>String</td><td>Yes</td><td>Text of the message to be sent</td></tr>
<tr><td>disable_notification</td><td>Boolean</td><td>Optional</td><td>Sends the message silently.</td></tr>
</tbody>
</table>
<h4><a class="anchor" name="sendmediagroup" href="#sendmediagroup"><i class="anchor-icon"></i></a>sendMediaGroup</h4>
<p>Use this method to send a group of photos or videos as an album. On success, an array of Messages that were sent is returned.</p>
<table class="table">
<thead>
<tr><th>Parameter</th><th>Type</th><th>Required</th><th>Description</th></tr>
</thead>
<tbody>
<tr><td>chat_id</td><td>Integer or String</td><td>Yes</td><td>Unique identifier for the target chat</td></tr>
<tr><td>media</td><td>Array of InputMediaAudio, InputMediaDocument, InputMediaPhoto and InputMediaVideo</td><td>Yes</td><td>A JSON-serialized array describing messages to be sent</td></tr>
</tbody>
</table>
<h4><a class="anchor" name="inputmessagecontent" href="#inputmessagecontent"><i class="anchor-icon"></i></a>InputMessageContent</h4>
<p>This object represents the content of a message to be sent as a result of an inline query. Telegram clients currently support the following 2 types:</p>
<ul>
<li><a href="#inputtextmessagecontent">InputTextMessageContent</a></li>
<li><a href="#inputlocationmessagecontent">InputLocationMessageContent</a></li>
</ul>
</div>
</body>
</html>
"##;

/// The generated text expected for [`PAGE`] with the settings comment disabled.
pub const PAGE_OUTPUT: &str = r#"# AUTO GENERATED

# Methods

method :get, "getUpdates", [{offset, [:integer], :optional}, {allowed_updates, [{:array, :string}], :optional}], [ExGram.Model.Update]

method :get, "getWebhookInfo", [], ExGram.Model.WebhookInfo

method :get, "getMe", [], ExGram.Model.User

method :post, "sendMessage", [{chat_id, [:integer, :string]}, {text, [:string]}, {disable_notification, [:boolean], :optional}], ExGram.Model.Message

method :post, "sendMediaGroup", [{chat_id, [:integer, :string]}, {media, [{:array, [InputMediaAudio, InputMediaDocument, InputMediaPhoto, InputMediaVideo]}]}], :any

# Models

defmodule Model do
  model Update, [{:update_id, :integer}, {:message, Message, :optional}]

  model User, [{:id, :integer}, {:is_bot, :boolean}, {:username, :string, :optional}]

  model Message, [{:message_id, :integer}, {:from, User, :optional}, {:photo, {:array, PhotoSize}, :optional}]

  # Generics

  defmodule InputMessageContent do
    @type t :: InputTextMessageContent.t() | InputLocationMessageContent.t()

    def decode_as(), do: %{}

    def subtypes() do
      [InputTextMessageContent, InputLocationMessageContent]
    end
  end

end
"#;

/// A JSON mirror covering every section kind.
pub const MIRROR: &str = r#"{
    "models": [
        {"name": "User", "params": [
            {"name": "id", "type": "int", "optional": false},
            {"name": "username", "type": "str", "optional": true}
        ]},
        {"name": "Message", "params": [
            {"name": "message_id", "type": "int"},
            {"name": "photo", "type": {"array": "PhotoSize"}, "optional": true}
        ]}
    ],
    "methods": [
        {"name": "getMe", "type": "get", "params": [], "return": "User"},
        {"name": "sendMessage", "type": "post", "params": [
            {"name": "chat_id", "type": ["int", "str"]},
            {"name": "text", "type": "str"}
        ], "return": "Message"},
        {"name": "deleteMessage", "type": "post", "params": [
            {"name": "message_id", "type": "int"}
        ], "return": "true"}
    ],
    "generics": [
        {"name": "ChatMember", "subtypes": ["ChatMemberOwner", "ChatMemberMember"]}
    ]
}"#;

/// The generated text expected for [`MIRROR`] with the settings comment disabled.
pub const MIRROR_OUTPUT: &str = r#"# AUTO GENERATED

# Methods

method :get, "getMe", [], ExGram.Model.User

method :post, "sendMessage", [{chat_id, [:integer, :string]}, {text, [:string]}], ExGram.Model.Message

method :post, "deleteMessage", [{message_id, [:integer]}], :boolean

# Models

defmodule Model do
  model User, [{:id, :integer}, {:username, :string, :optional}]

  model Message, [{:message_id, :integer}, {:photo, {:array, PhotoSize}, :optional}]

  # Generics

  defmodule ChatMember do
    @type t :: ChatMemberOwner.t() | ChatMemberMember.t()

    def decode_as(), do: %{}

    def subtypes() do
      [ChatMemberOwner, ChatMemberMember]
    end
  end

end
"#;

/// Write `content` into a fresh temporary directory, returning the directory and file path.
pub fn write_fixture(name: &str, content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);
    fs::write(&path, content).unwrap();
    (temp_dir, path)
}
