/*!
 * Integration tests for translation resolution through the controller
 */

use anyhow::Result;

use songlingo::providers::ProviderStage;
use songlingo::providers::mock::MockProvider;
use songlingo::translation::ResultSource;

use crate::common;

/// Test that failing providers never surface as an error
#[tokio::test]
async fn test_translate_withAllProvidersFailing_shouldReturnLowConfidenceMarker() -> Result<()> {
    let dictionary = MockProvider::failing(ProviderStage::Dictionary);
    let statistical = MockProvider::failing(ProviderStage::Statistical);
    let controller = common::controller_with_providers(&[&dictionary, &statistical])?;

    let result = controller.translate("사랑", "ko").await;

    assert!(!result.text.is_empty());
    assert_eq!(result.text, "[사랑]");
    assert!(result.confidence <= 0.2);
    assert_eq!(result.source, ResultSource::Untranslated);
    Ok(())
}

/// Test that identical requests reach a provider only once
#[tokio::test]
async fn test_translate_sameWordTwice_shouldCallProviderOnce() -> Result<()> {
    let statistical = MockProvider::working(ProviderStage::Statistical);
    let controller = common::controller_with_providers(&[&statistical])?;

    let first = controller.translate("corazón", "es").await;
    let second = controller.translate("corazón", "es").await;

    assert_eq!(first, second);
    assert_eq!(statistical.request_count(), 1);
    assert_eq!(controller.cache_stats().hits, 1);
    Ok(())
}

/// Test that the same word in another source language is a separate lookup
#[tokio::test]
async fn test_translate_sameWordOtherLanguage_shouldNotShareCache() -> Result<()> {
    let statistical = MockProvider::working(ProviderStage::Statistical);
    let controller = common::controller_with_providers(&[&statistical])?;

    controller.translate("amor", "es").await;
    controller.translate("amor", "pt").await;

    assert_eq!(statistical.request_count(), 2);
    Ok(())
}

/// Test that an intermittent provider is backed up by the next one
#[tokio::test]
async fn test_translate_withIntermittentProvider_shouldFallBackInOrder() -> Result<()> {
    let primary = MockProvider::intermittent(ProviderStage::Statistical, 2).with_name("primary");
    let backup = MockProvider::working(ProviderStage::Statistical).with_name("backup");
    let controller = common::controller_with_providers(&[&primary, &backup])?;

    // The second request to the primary fails
    controller.translate("uno", "es").await;
    let result = controller.translate("dos", "es").await;

    assert_eq!(result.source, ResultSource::Statistical);
    assert_eq!(primary.request_count(), 2);
    assert_eq!(backup.request_count(), 1);
    Ok(())
}

/// Test that lines go to the statistical stage only
#[tokio::test]
async fn test_translate_lyricLine_shouldSkipDictionaryStage() -> Result<()> {
    let dictionary = MockProvider::working(ProviderStage::Dictionary);
    let statistical = MockProvider::working(ProviderStage::Statistical);
    let controller = common::controller_with_providers(&[&dictionary, &statistical])?;

    let result = controller.translate("la noche es larga", "es").await;

    assert_eq!(result.source, ResultSource::Statistical);
    assert_eq!(dictionary.request_count(), 0);
    Ok(())
}

/// Test that several words resolve concurrently and keep their order
#[tokio::test]
async fn test_translateMany_shouldKeepInputOrder() -> Result<()> {
    let statistical = MockProvider::slow(ProviderStage::Statistical, 20);
    let controller = common::controller_with_providers(&[&statistical])?;

    let results = controller
        .resolver()
        .translate_many(&["sol", "luna", "mar"], "es")
        .await;

    let texts: Vec<&str> = results.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, vec!["translated sol", "translated luna", "translated mar"]);
    Ok(())
}

/// Test that a translated vocabulary entry is written back to the store
#[tokio::test]
async fn test_translateVocabulary_shouldBackFillTranslation() -> Result<()> {
    let statistical = MockProvider::working(ProviderStage::Statistical);
    let controller = common::controller_with_providers(&[&statistical])?;
    let korean = common::language(&controller, "ko")?;
    controller.add_song("노래", "가수", korean.id, "하늘 바다")?;

    let entry = controller
        .vocabulary_for(korean.id)?
        .into_iter()
        .find(|v| v.word == "하늘")
        .expect("word recorded");
    controller.translate_vocabulary(&entry, &korean.code).await?;

    let updated = controller
        .vocabulary_for(korean.id)?
        .into_iter()
        .find(|v| v.word == "하늘")
        .expect("word still recorded");
    assert_eq!(updated.translation, "translated 하늘");
    assert_eq!(updated.frequency_count, entry.frequency_count);
    Ok(())
}

/// Test that the untranslated marker is never written back
#[tokio::test]
async fn test_translateVocabulary_withFailingProviders_shouldKeepStoredTranslation() -> Result<()> {
    let statistical = MockProvider::failing(ProviderStage::Statistical);
    let controller = common::controller_with_providers(&[&statistical])?;
    let spanish = common::language(&controller, "es")?;
    controller.add_song("Canción", "A", spanish.id, "amor")?;

    let entry = controller.vocabulary_for(spanish.id)?.remove(0);
    let result = controller.translate_vocabulary(&entry, "es").await?;

    assert!(!result.is_translated());
    assert_eq!(controller.vocabulary_for(spanish.id)?[0].translation, "love");
    Ok(())
}
